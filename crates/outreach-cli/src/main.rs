//! Outreach CLI — command-line interface for the insurance outreach backend.
//!
//! Reuses the same core domain logic (outreach-core) and server bootstrap
//! (outreach-server) that power the HTTP API.

mod commands;

use clap::{Parser, Subcommand};

use commands::ConfigArgs;

/// Outreach CLI — personalized insurance outreach
#[derive(Parser)]
#[command(name = "outreach", version, about = "Outreach CLI — personalized insurance outreach")]
pub struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the outreach HTTP server
    Server {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },

    /// Manage prospects
    Prospect {
        #[command(subcommand)]
        action: ProspectAction,
    },

    /// Run the outreach workflow for a stored prospect
    Process {
        /// Prospect ID
        id: String,
        /// email, call or both (defaults to the prospect's preferred channel)
        #[arg(long)]
        channel: Option<String>,
    },

    /// Query or extend the industry knowledge base
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeAction,
    },
}

#[derive(Subcommand)]
enum ProspectAction {
    /// Add a prospect and run outreach for it
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        industry: String,
        #[arg(long)]
        contact: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "email")]
        channel: String,
        /// Known objection (repeatable)
        #[arg(long = "objection")]
        objections: Vec<String>,
        /// Store only; skip the outreach workflow
        #[arg(long)]
        no_process: bool,
    },
    List {
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        engagement: Option<String>,
        #[arg(long)]
        channel: Option<String>,
    },
    Get {
        id: String,
    },
    History {
        id: String,
    },
}

#[derive(Subcommand)]
enum KnowledgeAction {
    /// Look up context for a query
    Query {
        #[arg(long)]
        industry: String,
        #[arg(long)]
        top_k: Option<usize>,
        text: String,
    },
    /// Add a fact to the vector index
    Add {
        #[arg(long)]
        industry: String,
        text: String,
    },
    /// Upload the curated industry facts to the vector index
    Seed,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    outreach_server::init_tracing();

    let config = cli.config.to_config();

    let result = match cli.command {
        Commands::Server { host, port } => commands::server::run(host, port, &config).await,

        Commands::Prospect { action } => {
            let state = commands::init_state(&config);
            match action {
                ProspectAction::Add {
                    company,
                    industry,
                    contact,
                    email,
                    phone,
                    notes,
                    channel,
                    objections,
                    no_process,
                } => {
                    let args = commands::prospect::AddArgs {
                        company,
                        industry,
                        contact,
                        email,
                        phone,
                        notes,
                        channel,
                        objections,
                        process: !no_process,
                    };
                    commands::prospect::add(&state, args).await
                }
                ProspectAction::List {
                    industry,
                    engagement,
                    channel,
                } => {
                    commands::prospect::list(
                        &state,
                        industry.as_deref(),
                        engagement.as_deref(),
                        channel.as_deref(),
                    )
                    .await
                }
                ProspectAction::Get { id } => commands::prospect::get(&state, &id).await,
                ProspectAction::History { id } => commands::prospect::history(&state, &id).await,
            }
        }

        Commands::Process { id, channel } => {
            let state = commands::init_state(&config);
            commands::process::run(&state, &id, channel.as_deref()).await
        }

        Commands::Knowledge { action } => {
            let state = commands::init_state(&config);
            match action {
                KnowledgeAction::Query {
                    industry,
                    top_k,
                    text,
                } => commands::knowledge::query(&state, &text, &industry, top_k).await,
                KnowledgeAction::Add { industry, text } => {
                    commands::knowledge::add(&state, &text, &industry).await
                }
                KnowledgeAction::Seed => commands::knowledge::seed(&state).await,
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
