use actix_web::{HttpResponse, ResponseError};
use actix_web::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::common::{ErrorBody, OtpResponse, MSG_OTP_FAILED};
use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0} required")]
    MissingFields(&'static str),
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error("Invalid request body: {0}")]
    BadPayload(String),
    #[error("{0} not configured")]
    NotConfigured(String),
    #[error("gateway responded with status {status}")]
    Upstream { status: u16, payload: Value },
    #[error("gateway call failed: {0}")]
    Transport(#[source] GatewayError),
    #[error("relay call failed: {0}")]
    Forward(#[source] GatewayError),
}

impl RelayError {

    /// Caller mistakes; these are never server faults.
    pub fn is_client_error(&self) -> bool {
        matches!(self,
            RelayError::MethodNotAllowed
            | RelayError::MissingFields(_)
            | RelayError::PayloadTooLarge
            | RelayError::BadPayload(_))
    }
}

impl ResponseError for RelayError {

    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingFields(_) | RelayError::BadPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // pass through whatever the gateway said, unless it is not a status at all
            RelayError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            RelayError::Transport(_) | RelayError::Forward(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            RelayError::MethodNotAllowed
            | RelayError::MissingFields(_)
            | RelayError::PayloadTooLarge
            | RelayError::NotConfigured(_) => response.json(ErrorBody::new(self.to_string())),
            RelayError::BadPayload(_) => response.json(ErrorBody::new("Invalid request body")),
            RelayError::Upstream { payload, .. } => response.json(OtpResponse::rejected(payload.clone())),
            RelayError::Transport(_) => response.json(OtpResponse::internal_error()),
            RelayError::Forward(source) => response.json(ErrorBody::with_details(MSG_OTP_FAILED, source.to_string())),
        }
    }
}
