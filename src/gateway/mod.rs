use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::server::error::RelayError;

pub mod relay;
pub mod semaphore;

pub use relay::RelayGateway;
pub use semaphore::SemaphoreGateway;

pub const SEMAPHORE_OTP_URL: &str = "https://api.semaphore.co/api/v4/otp";

/// One OTP dispatch, built from the inbound body plus the configured key.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpSend {
    pub api_key: Option<String>,
    pub number: String,
    pub message: Option<String>,
}

/// Whatever the gateway answered, regardless of status.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    pub status: u16,
    pub payload: Value,
}

impl GatewayReply {

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request to the gateway failed: {0}")]
    Send(String),
    #[error("failed to read the gateway response: {0}")]
    Payload(String),
    #[error("gateway responded with invalid JSON: {0}")]
    Decode(String),
}

/// An upstream SMS gateway. Futures are not `Send` because the awc client
/// lives on the worker thread that created it.
#[async_trait(?Send)]
pub trait Gateway {

    fn name(&self) -> &'static str;

    /// Whether the configured API key must be present before calling out.
    fn requires_api_key(&self) -> bool {
        true
    }

    /// Issues exactly one request; no retries.
    async fn send_otp(&self, otp: &OtpSend) -> Result<GatewayReply, GatewayError>;

    /// Maps a transport failure onto the error the caller sees.
    fn failure(&self, error: GatewayError) -> RelayError {
        RelayError::Transport(error)
    }
}

/// An empty body is accepted as `null`; anything else must be JSON.
/// Only 2xx bodies are held to this, see `exchange`.
pub(crate) fn decode_payload(body: &[u8]) -> Result<Value, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Awaits a sent request and captures status plus decoded body.
pub(crate) async fn exchange(request: awc::SendClientRequest) -> Result<GatewayReply, GatewayError> {
    let mut response = request.await
        .map_err(|e| GatewayError::Send(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response.body().await
        .map_err(|e| GatewayError::Payload(e.to_string()))?;
    let payload = if (200..300).contains(&status) {
        decode_payload(&body)?
    } else {
        // keep the gateway's status even when its error page is not JSON
        decode_payload(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    Ok(GatewayReply { status, payload })
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_payload_accepts_json_and_empty_bodies() {
        assert_eq!(decode_payload(br#"{"message":"Sent"}"#).unwrap(), json!({"message": "Sent"}));
        assert_eq!(decode_payload(b"").unwrap(), Value::Null);
        assert_eq!(decode_payload(b" \n").unwrap(), Value::Null);
    }

    #[test]
    fn decode_payload_rejects_malformed_bodies() {
        let err = decode_payload(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn only_2xx_counts_as_success() {
        let reply = |status| GatewayReply { status, payload: Value::Null };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(422).is_success());
    }
}
