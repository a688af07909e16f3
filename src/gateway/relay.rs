use async_trait::async_trait;
use serde::Serialize;

use crate::gateway::{exchange, Gateway, GatewayError, GatewayReply, OtpSend};
use crate::server::error::RelayError;

/// A self-hosted relay that owns its own credentials, so nothing secret
/// leaves this process.
pub struct RelayGateway {
    client: awc::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct RelayBody<'a> {
    phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl RelayGateway {

    pub fn new(client: awc::Client, url: impl Into<String>) -> Self {
        RelayGateway { client, url: url.into() }
    }
}

#[async_trait(?Send)]
impl Gateway for RelayGateway {

    fn name(&self) -> &'static str {
        "relay"
    }

    fn requires_api_key(&self) -> bool {
        false
    }

    async fn send_otp(&self, otp: &OtpSend) -> Result<GatewayReply, GatewayError> {
        let body = RelayBody {
            phone: &otp.number,
            message: otp.message.as_deref(),
        };
        debug!("POST {} (json)", self.url);
        exchange(self.client.post(&self.url).send_json(&body)).await
    }

    fn failure(&self, error: GatewayError) -> RelayError {
        RelayError::Forward(error)
    }
}
