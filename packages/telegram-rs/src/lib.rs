// https://core.telegram.org/bots/api#sendmessage

pub mod models;
use reqwest::Client;

use crate::models::SendMessageResponse;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct TelegramOptions {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct TelegramService {
    options: TelegramOptions,
}

impl TelegramService {
    pub fn new(options: TelegramOptions) -> Self {
        Self { options }
    }

    pub async fn send_message(
        self: &TelegramService,
        text: &str,
    ) -> Result<SendMessageResponse, &'static str> {
        let url = format!(
            "https://api.telegram.org/bot{token}/sendMessage",
            token = self.options.bot_token
        );

        // HTML parse mode; link previews disabled so long reports stay compact
        let body = json!({
            "chat_id": self.options.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let client = Client::new();
        let res = client.post(url).json(&body).send().await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    // Log the error response from Telegram
                    let error_body = response.text().await.unwrap_or_default();
                    tracing::error!("Telegram error ({}): {}", status, error_body);
                    return Err("Telegram returned an error");
                }

                let result = response.json::<SendMessageResponse>().await;
                match result {
                    Ok(data) if data.ok => Ok(data),
                    Ok(data) => {
                        tracing::error!(
                            "Telegram rejected the message: {}",
                            data.description.unwrap_or_default()
                        );
                        Err("Telegram rejected the message")
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse Telegram response: {}", e);
                        Err("Error parsing sendMessage response")
                    }
                }
            }
            Err(e) => {
                tracing::error!("Request to Telegram failed: {}", e);
                Err("Error sending Telegram message")
            }
        }
    }
}
