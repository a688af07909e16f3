pub mod env;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MSG_OTP_SENT: &str = "OTP sent successfully";
pub const MSG_OTP_FAILED: &str = "Failed to send OTP";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error";

pub fn print_banner(mode: &str) {
    // We don't need this as a constant because it will be shown only once.
    let banner: &str = "\n\n\
\x20   ___ _____ ___   ___     _\n\
\x20  / _ \\_   _| _ \\ | _ \\___| |__ _ _  _\n\
\x20 | (_) || | |  _/ |   / -_) / _` | || |\n\
\x20  \\___/ |_| |_|   |_|_\\___|_\\__,_|\\_, |\n\
\x20                                  |__/\n\
\x20  =====================================\n";
    println!("{}\x20  Upstream: {}\n\n", banner, mode);
}

/// Keeps the last four digits so log lines can be correlated without
/// carrying the full number.
pub fn mask_number(number: &str) -> String {
    let chars: Vec<char> = number.trim().chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// The envelope returned once the upstream gateway has answered.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OtpResponse {
    pub success: bool,
    /// A string of our own, or whatever the gateway put under `message` on rejection.
    pub message: Value,
    pub data: Value,
}

impl OtpResponse {

    pub fn sent(data: Value) -> Self {
        OtpResponse { success: true, message: Value::from(MSG_OTP_SENT), data }
    }

    /// Uses the gateway's own `message` when it carries one, whatever its shape.
    pub fn rejected(data: Value) -> Self {
        let message = data.get("message")
            .filter(|message| !message.is_null())
            .cloned()
            .unwrap_or_else(|| Value::from(MSG_OTP_FAILED));
        OtpResponse { success: false, message, data }
    }

    pub fn internal_error() -> Self {
        OtpResponse { success: false, message: Value::from(MSG_INTERNAL_ERROR), data: Value::Null }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {

    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody { error: error.into(), details: None }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        ErrorBody { error: error.into(), details: Some(details.into()) }
    }
}
