use actix_cors::Cors;
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use ailways_web::{route_guard, routes, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> ailways_web::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Settings::new()?;
    info!("Configuration loaded successfully ({})", config.environment);
    info!("Forwarding auth requests to {}", config.backend.url);

    let state = web::Data::new(AppState::new(config.clone())?);

    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    let workers = config.server.workers as usize;
    info!("Starting server at http://{}:{}", config.server.host, config.server.port);

    HttpServer::new(move || {
        let cors = if config.cors.enabled {
            config
                .cors
                .allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allowed_methods(vec!["GET", "POST"])
                .allowed_headers(vec!["Content-Type", "X-CSRF-Token"])
                .supports_credentials()
                .max_age(config.cors.max_age as usize)
        } else {
            // CORS disabled - use most restrictive settings
            Cors::default()
        };

        let paths = config.routes.clone();
        App::new()
            .wrap(from_fn(route_guard))
            .wrap(cors)
            .wrap(Logger::new("%r %s %Dms"))
            .app_data(state.clone())
            .configure(move |cfg| routes(cfg, &paths))
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
