//! Outbound delivery channels.
//!
//! Senders report success as a plain `bool`. They never panic or return an
//! error, and never retry; the workflow records a `false` as a failed
//! history entry.

pub mod call;
pub mod email;

use async_trait::async_trait;

use crate::generator::{CallScript, EmailContent};
use crate::models::Prospect;

pub use call::HttpCallScheduler;
pub use email::SmtpEmailSender;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, prospect: &Prospect, content: &EmailContent, history_id: &str) -> bool;
}

#[async_trait]
pub trait CallScheduler: Send + Sync {
    async fn schedule_call(&self, prospect: &Prospect, script: &CallScript, history_id: &str) -> bool;
}
