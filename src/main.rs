use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use rentaride::config::AppConfig;
use rentaride::db;
use rentaride::handlers;
use rentaride::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    if config.seed_demo_data {
        db::seed::seed_demo_data(&conn)?;
    }

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/vehicles", get(handlers::vehicles::list_vehicles))
        .route("/api/vehicles/:id", get(handlers::vehicles::get_vehicle))
        .route(
            "/api/vehicles/:id/booked-dates",
            get(handlers::vehicles::get_booked_dates),
        )
        .route(
            "/api/vehicles/:id/availability",
            get(handlers::vehicles::check_availability),
        )
        .route("/api/vehicles/:id/quote", get(handlers::vehicles::get_quote))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route("/api/admin/login", post(handlers::admin::login))
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route(
            "/api/admin/bookings/:id/status",
            post(handlers::admin::update_booking_status),
        )
        .route("/api/admin/vehicles", post(handlers::admin::add_vehicle))
        .route(
            "/api/admin/vehicles/:id",
            put(handlers::admin::update_vehicle).delete(handlers::admin::delete_vehicle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
