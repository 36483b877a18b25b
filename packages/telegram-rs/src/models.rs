use serde::{Deserialize, Serialize};

/// Envelope returned by every Bot API method.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    pub result: Option<SentMessage>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
    pub date: i64,
    pub text: Option<String>,
}
