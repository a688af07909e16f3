use actix_web::{HttpRequest, HttpResponse, web};
use actix_web::http::Method;
use futures_util::StreamExt as _;
use serde_json::Value;
use uuid::Uuid;

use crate::common::{mask_number, OtpResponse};
use crate::common::env::ReadEnv;
use crate::gateway::{Gateway, OtpSend};
use crate::server::error::RelayError;

/// Upper bound on an inbound body; a phone number and a message fit many times over.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Per-worker state behind the send-otp route.
pub struct Relay {
    gateway: Box<dyn Gateway>,
    env: Box<dyn ReadEnv>,
    api_key_var: String,
    require_message: bool,
}

impl Relay {

    pub fn new(gateway: impl Gateway + 'static,
               env: impl ReadEnv + 'static,
               api_key_var: impl Into<String>,
               require_message: bool) -> Self {
        Relay {
            gateway: Box::new(gateway),
            env: Box::new(env),
            api_key_var: api_key_var.into(),
            require_message,
        }
    }

    /// Validates, calls the gateway once and maps its answer. Stops at the first failing step.
    pub async fn send(&self, request_id: &str, method: &Method, payload: web::Payload) -> Result<HttpResponse, RelayError> {
        if *method == Method::OPTIONS {
            return Ok(HttpResponse::Ok().finish());
        }
        if *method != Method::POST {
            return Err(RelayError::MethodNotAllowed);
        }

        let body = read_body(payload).await?;
        let (number, message) = self.required_fields(&body)?;
        let api_key = self.api_key()?;

        info!("[req:{}] Sending OTP to {} via {}", request_id, mask_number(&number), self.gateway.name());
        let otp = OtpSend { api_key, number, message };
        let reply = self.gateway.send_otp(&otp).await
            .map_err(|e| self.gateway.failure(e))?;

        if !reply.is_success() {
            return Err(RelayError::Upstream { status: reply.status, payload: reply.payload });
        }
        debug!("[req:{}] Gateway accepted the request with status {}", request_id, reply.status);
        Ok(HttpResponse::Ok().json(OtpResponse::sent(reply.payload)))
    }

    /// An unparseable body counts as one without fields.
    fn required_fields(&self, body: &[u8]) -> Result<(String, Option<String>), RelayError> {
        let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let phone = text_field(&body, "phone");
        let message = text_field(&body, "message");
        match (phone, message) {
            (None, None) if self.require_message => Err(RelayError::MissingFields("Phone number and message")),
            (None, _) => Err(RelayError::MissingFields("Phone number")),
            (Some(_), None) if self.require_message => Err(RelayError::MissingFields("Message")),
            (Some(phone), message) => Ok((phone, message)),
        }
    }

    /// Read on every call so a key provisioned after start-up is picked up.
    fn api_key(&self) -> Result<Option<String>, RelayError> {
        if !self.gateway.requires_api_key() {
            return Ok(None);
        }
        match self.env.var(&self.api_key_var) {
            Ok(key) if !key.trim().is_empty() => Ok(Some(key)),
            _ => Err(RelayError::NotConfigured(self.api_key_var.clone())),
        }
    }
}

/// Stops reading as soon as the body outgrows `MAX_BODY_SIZE`.
async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut, RelayError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| RelayError::BadPayload(e.to_string()))?;
        if body.len() + chunk.len() > MAX_BODY_SIZE {
            return Err(RelayError::PayloadTooLarge);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

pub async fn handle(relay: web::Data<Relay>,
                    request: HttpRequest,
                    payload: web::Payload) -> Result<HttpResponse, RelayError> {
    let request_id = Uuid::new_v4().to_string();
    let result = relay.send(&request_id, request.method(), payload).await;
    if let Err(err) = &result {
        match err {
            err if err.is_client_error() => debug!("[req:{}] Rejected: {}", request_id, err),
            RelayError::Upstream { .. } => warn!("[req:{}] {}", request_id, err),
            err => error!("[req:{}] {}", request_id, err),
        }
    }
    result
}
