//! Notification sink behind a trait so the scan pipeline never talks to
//! Telegram directly.

use async_trait::async_trait;
use telegram::{TelegramOptions, TelegramService};
use tracing::{error, info};

use crate::error::{NotifyError, NotifyResult};

/// Delivers one rendered report body.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, body: &str) -> NotifyResult<()>;
}

/// Telegram-backed notifier used in production.
pub struct TelegramNotifier {
    service: TelegramService,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            service: TelegramService::new(TelegramOptions { bot_token, chat_id }),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, body: &str) -> NotifyResult<()> {
        self.service
            .send_message(body)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

/// Send the report, logging delivery failures without failing the run.
pub async fn deliver_report(notifier: &dyn Notifier, body: &str) {
    match notifier.notify(body).await {
        Ok(()) => info!("Report delivered"),
        Err(e) => error!(error = %e, "Failed to deliver report"),
    }
}
