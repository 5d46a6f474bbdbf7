use std::net::IpAddr;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;

use message_board::config::Config;
use message_board::databases::setup_store;
use message_board::routes;

fn log_lan_address(host: &str, port: u16) {
    let unspecified = host
        .parse::<IpAddr>()
        .map(|ip| ip.is_unspecified())
        .unwrap_or(false);
    if !unspecified {
        return;
    }

    match local_ip_address::local_ip() {
        Ok(ip) => log::info!("Reachable on the local network at http://{}:{}", ip, port),
        Err(e) => log::warn!("Could not determine local IP address: {}", e),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let store = setup_store(&config).await?;
    let store = web::Data::from(store);

    let static_dir = config.static_dir.clone();
    if let Some(dir) = &static_dir {
        log::info!("Serving static files from {}", dir);
    }

    log::info!("Listening on http://{}:{}", config.host, config.port);
    log_lan_address(&config.host, config.port);

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .configure(routes::init)
            .configure(move |cfg| {
                if let Some(dir) = &static_dir {
                    routes::static_files::init(cfg, dir);
                }
            })
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("HTTP server error")
}
