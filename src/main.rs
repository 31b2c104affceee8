use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use bloodlink::config::{LoggingSettings, Settings};
use bloodlink::error::{handle_json_payload_error, handle_query_payload_error};
use bloodlink::routes::{self, AppState};
use bloodlink::services::{DirectoryStore, GeocodeCache, GeocodingClient, SessionAuthenticator};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn io_error<E: std::fmt::Display>(context: &str, err: E) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(io_error("Configuration error", e));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Bloodlink service...");

    let db = &settings.database;
    let max_conn = db.max_connections.unwrap_or(10);
    let store = DirectoryStore::connect(
        &db.url,
        max_conn,
        db.min_connections.unwrap_or(1),
        db.acquire_timeout_secs.unwrap_or(5),
        db.idle_timeout_secs.unwrap_or(600),
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        io_error("PostgreSQL connection error", e)
    })?;

    info!("Directory store initialized (max: {} connections)", max_conn);

    let geo = &settings.geocoding;
    let cache = GeocodeCache::new(geo.cache_capacity, geo.cache_ttl_secs);
    let geocoder = GeocodingClient::new(
        geo.endpoint.clone(),
        geo.user_agent.clone(),
        geo.timeout_secs,
        cache,
    )
    .map_err(|e| io_error("Geocoding client error", e))?;

    info!(
        "Geocoder initialized ({}; cache: {} entries, TTL: {}s)",
        geo.endpoint, geo.cache_capacity, geo.cache_ttl_secs
    );

    let authenticator =
        SessionAuthenticator::new(&settings.auth.jwt_secret, settings.auth.issuer.as_deref());

    let app_state = AppState {
        store: Arc::new(store),
        geocoder: Arc::new(geocoder),
        authenticator: Arc::new(authenticator),
        matching: settings.matching,
    };

    info!("Matching defaults: {:?}", settings.matching);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
