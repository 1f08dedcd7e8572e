//! `outreach server` — Start the outreach HTTP server.

use outreach_core::OutreachConfig;

pub async fn run(host: String, port: u16, config: &OutreachConfig) -> Result<(), String> {
    let state = super::init_state(config);
    let server_config = outreach_server::ServerConfig {
        host: host.clone(),
        port,
    };

    println!("Starting outreach server on {}:{}...", host, port);

    let addr = outreach_server::start_server(server_config, state).await?;
    println!("Outreach server listening on http://{}", addr);

    // Keep the process running until interrupted
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl+C: {}", e))?;

    println!("\nShutting down...");
    Ok(())
}
