mod aggregation;
mod config;
mod services;
mod storage;

use crate::aggregation::SchoolService;
use crate::config::AppConfig;
use crate::storage::SqliteStore;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // One store serves both repositories; each call opens its own connection.
    let store = SqliteStore::open(&config.database_path).map_err(io::Error::other)?;
    let school_service = SchoolService::new(Arc::new(store.clone()), Arc::new(store));

    let url = format!("http://{}:{}", config.host, config.port);
    info!("Server running at {}", url);

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(school_service.clone()))
            .service(services::schools::configure_routes())
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
