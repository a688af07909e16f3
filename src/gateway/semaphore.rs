use async_trait::async_trait;
use serde::Serialize;

use crate::gateway::{exchange, Gateway, GatewayError, GatewayReply, OtpSend};

/// Semaphore's OTP endpoint: a form post carrying the API key.
pub struct SemaphoreGateway {
    client: awc::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct SemaphoreForm<'a> {
    apikey: &'a str,
    number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl SemaphoreGateway {

    pub fn new(client: awc::Client, url: impl Into<String>) -> Self {
        SemaphoreGateway { client, url: url.into() }
    }
}

#[async_trait(?Send)]
impl Gateway for SemaphoreGateway {

    fn name(&self) -> &'static str {
        "semaphore"
    }

    async fn send_otp(&self, otp: &OtpSend) -> Result<GatewayReply, GatewayError> {
        let form = SemaphoreForm {
            apikey: otp.api_key.as_deref().unwrap_or_default(),
            number: &otp.number,
            message: otp.message.as_deref(),
        };
        debug!("POST {} (form)", self.url);
        exchange(self.client.post(&self.url).send_form(&form)).await
    }
}
