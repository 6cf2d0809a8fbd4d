use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;

use taskmanager::config::Config;
use taskmanager::routes::health;
use taskmanager::AppContext;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Invalid configuration: {}", e))
    })?;

    let pool = PgPoolOptions::new()
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Failed to connect to database: {}", e))
        })?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Failed to run migrations: {}", e))
        })?;

    let context = AppContext::postgres(pool, &config);

    log::info!("Starting taskmanager server at {}", config.server_url());
    HttpServer::new(move || {
        let context = context.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .configure(move |cfg| context.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
