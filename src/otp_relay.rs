#[macro_use]
extern crate log;

use actix_web::{App, HttpServer, middleware, web};

use crate::common::env::SystemEnv;
use crate::server::options;

mod common;
mod gateway;
mod server;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("actix_web=info,otp_relay=debug"));

    let options: options::ServerOptions = options::parse_options();

    common::print_banner(options.upstream.as_str());
    info!("Relaying OTP requests to {} (timeout {}s)", options.upstream_url(), options.timeout);

    let bind_addr = (options.bind_addr.clone(), options.port);
    HttpServer::new(move || {
        // awc clients are bound to the worker thread, so every worker builds its own relay
        let relay = server::build_relay(&options, SystemEnv);
        App::new()
            .wrap(server::cors_headers())
            // enable logger
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(relay))
            .configure(server::configure_routes)
    })
        .bind(bind_addr)?
        .run()
        .await
}
