use std::time::Duration;

use actix_web::middleware::DefaultHeaders;
use actix_web::web;

use crate::common::env::ReadEnv;
use crate::gateway::{RelayGateway, SemaphoreGateway};
use crate::server::handler_send_otp::Relay;
use crate::server::options::{ServerOptions, Upstream};

pub mod error;
pub mod handler_send_otp;
pub mod options;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // every method reaches the handler, it answers preflights and 405s itself
    cfg.service(web::resource("/api/send-otp").route(web::to(handler_send_otp::handle)))
        .service(web::resource("/send-otp").route(web::to(handler_send_otp::handle)))
        .route("/ping", web::get().to(|| async { "pong" }));
}

/// Added to every response, errors included.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

pub fn build_relay<E: ReadEnv + 'static>(options: &ServerOptions, env: E) -> Relay {
    let client = awc::Client::builder()
        .timeout(Duration::from_secs(options.timeout))
        .finish();
    let url = options.upstream_url().to_string();
    match options.upstream {
        Upstream::Semaphore => Relay::new(
            SemaphoreGateway::new(client, url), env, &options.api_key_var, options.require_message()),
        Upstream::Relay => Relay::new(
            RelayGateway::new(client, url), env, &options.api_key_var, options.require_message()),
    }
}
