use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{self, satellites, AppState};

/// Full application router with global middleware
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(driver_routes())
        .merge(satellite_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    let router = if config.security.enable_cors {
        router.layer(cors_layer(&config.security))
    } else {
        router
    };

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn driver_routes() -> Router<AppState> {
    use handlers::{drivers, profiles};

    Router::new()
        .route("/drivers/pending", get(drivers::pending))
        .route("/drivers/pending-details", get(profiles::pending_details))
        .route("/drivers/details", get(profiles::all_details))
        .route("/drivers/:id/details", get(profiles::driver_details))
        .route("/drivers/update-status", post(drivers::update_status))
}

fn satellite_routes() -> Router<AppState> {
    use satellites::{background_check, banking, insurance, vehicle};

    Router::new()
        .route("/drivers/:id/vehicles", get(vehicle::list))
        .route("/drivers/vehicle", post(vehicle::save))
        .route("/drivers/:id/background-checks", get(background_check::list))
        .route("/drivers/background-check", post(background_check::record))
        .route("/drivers/:id/insurance", get(insurance::list))
        .route("/drivers/insurance", post(insurance::record))
        .route("/drivers/:id/banking", get(banking::get))
        .route("/drivers/banking", post(banking::save))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
