mod config;
mod db;
mod error;
mod services;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = config::Config::load();

    // Make sure the schema exists before the first request hits it.
    {
        let conn = db::open(&config.db_path).expect("Failed to open database");
        db::init(&conn).expect("Failed to initialize schema");
    }

    let bind_addr = (config.host.clone(), config.port);
    info!("Server running at http://{}:{}", config.host, config.port);

    let data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(data.clone())
            .service(services::colleges::configure_routes())
            .service(services::scholarships::configure_routes())
            .service(services::catalog::institutions::configure_routes())
            .service(services::catalog::scholarships::configure_routes())
    })
    .bind(bind_addr)?
    .run()
    .await
}
