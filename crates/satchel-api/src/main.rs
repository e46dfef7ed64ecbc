//! satchel-api - HTTP API server for the Satchel browser companion

mod handlers;

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use governor::{Quota, RateLimiter};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use uuid::Uuid;

use satchel_core::defaults;
use satchel_db::Database;

use handlers::{
    history::{append_history, list_history},
    settings::{get_settings, upsert_settings},
    shortcuts::{create_shortcut, delete_shortcut, list_shortcuts, update_shortcut},
    system::{health_check, openapi_yaml, root, test_db},
    users::{get_user, upsert_user},
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APP STATE
// =============================================================================

type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    db: Database,
    /// Global rate limiter (None if rate limiting is disabled).
    rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

/// OpenAPI documentation (utoipa metadata).
///
/// The full spec is maintained in `openapi.yaml` and served at
/// `/openapi.yaml`.
#[allow(dead_code)]
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Satchel Sync API",
        version = "0.4.2",
        description = "Per-user settings, shortcuts, and browsing history for the Satchel browser companion"
    ),
    tags(
        (name = "Users", description = "User upsert and lookup"),
        (name = "Shortcuts", description = "Bookmarked shortcut CRUD"),
        (name = "History", description = "Append-only browsing history"),
        (name = "Settings", description = "Per-user preferences"),
        (name = "System", description = "Liveness and diagnostics")
    )
)]
struct ApiDoc;

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Parse a comma-separated origin list into header values, dropping (and
/// warning about) entries that don't parse.
fn parse_origin_list(origins_str: &str) -> Vec<HeaderValue> {
    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// Build the CORS layer from the `ALLOWED_ORIGINS` environment variable.
///
/// Companion clients run from browser-extension origins that cannot be
/// enumerated ahead of time, so an unset or empty variable means a
/// permissive policy (any origin, no credentials). Setting it switches to a
/// strict whitelist with credentials.
fn cors_layer() -> CorsLayer {
    let origins = std::env::var("ALLOWED_ORIGINS")
        .map(|s| parse_origin_list(&s))
        .unwrap_or_default();

    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    }
}

// =============================================================================
// RATE LIMITING MIDDLEWARE
// =============================================================================

async fn rate_limit_middleware(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // If rate limiting is disabled, pass through
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "satchel_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "satchel_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("satchel-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/satchel".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| defaults::SERVER_PORT.to_string())
        .parse()
        .unwrap_or(defaults::SERVER_PORT);

    // Rate limiting configuration
    // RATE_LIMIT_REQUESTS: requests per period (default: 100)
    // RATE_LIMIT_PERIOD_SECS: period in seconds (default: 60 = 1 minute)
    let rate_limit_requests: u64 = std::env::var("RATE_LIMIT_REQUESTS")
        .unwrap_or_else(|_| defaults::RATE_LIMIT_REQUESTS.to_string())
        .parse()
        .unwrap_or(defaults::RATE_LIMIT_REQUESTS);
    let rate_limit_period_secs: u64 = std::env::var("RATE_LIMIT_PERIOD_SECS")
        .unwrap_or_else(|_| defaults::RATE_LIMIT_PERIOD_SECS.to_string())
        .parse()
        .unwrap_or(defaults::RATE_LIMIT_PERIOD_SECS);
    let rate_limit_enabled: bool = std::env::var("RATE_LIMIT_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);

    info!(
        "Rate limiting: {} ({} requests per {} seconds)",
        if rate_limit_enabled {
            "enabled"
        } else {
            "disabled"
        },
        rate_limit_requests,
        rate_limit_period_secs
    );

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");

    // Run pending database migrations on startup
    info!("Running database migrations...");
    db.migrate().await?;
    info!("Database migrations complete");

    // Create rate limiter if enabled
    let rate_limiter = if rate_limit_enabled {
        let quota = Quota::with_period(std::time::Duration::from_secs(rate_limit_period_secs))
            .expect("Rate limit period must be non-zero")
            .allow_burst(
                NonZeroU32::new(rate_limit_requests as u32).expect("Rate limit must be non-zero"),
            );
        Some(Arc::new(RateLimiter::direct(quota)))
    } else {
        None
    };

    // Create app state
    let state = AppState { db, rate_limiter };

    // Build router
    //
    // GET /shortcuts/:id takes the firebase uid, while PUT and DELETE take a
    // shortcut UUID; the path shapes are identical so they share one
    // registration and each handler extracts its own parameter type.
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/test-db", get(test_db))
        .route("/openapi.yaml", get(openapi_yaml))
        .route("/users", post(upsert_user))
        .route("/users/:firebase_uid", get(get_user))
        .route("/shortcuts", post(create_shortcut))
        .route(
            "/shortcuts/:id",
            get(list_shortcuts)
                .put(update_shortcut)
                .delete(delete_shortcut),
        )
        .route("/history", post(append_history))
        .route("/history/:firebase_uid", get(list_history))
        .route("/settings", post(upsert_settings))
        .route("/settings/:firebase_uid", get(get_settings))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer())
        .layer(RequestBodyLimitLayer::new(defaults::BODY_LIMIT_BYTES))
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
#[allow(dead_code)]
enum ApiError {
    Database(satchel_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<satchel_core::Error> for ApiError {
    fn from(err: satchel_core::Error) -> Self {
        match &err {
            // Unknown referenced user surfaces with the fixed client-facing
            // message regardless of which layer produced it.
            satchel_core::Error::UserNotFound(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            satchel_core::Error::ShortcutNotFound(id) => {
                ApiError::NotFound(format!("Shortcut {} not found", id))
            }
            satchel_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            satchel_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_statuses() {
        let not_found = ApiError::NotFound("User not found".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let bad_request = ApiError::BadRequest("bad".to_string()).into_response();
        assert_eq!(bad_request.status(), StatusCode::BAD_REQUEST);

        let database =
            ApiError::Database(satchel_core::Error::Config("boom".to_string())).into_response();
        assert_eq!(database.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_user_not_found_maps_to_fixed_404_message() {
        let err: ApiError = satchel_core::Error::UserNotFound("abc123".to_string()).into();
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "User not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_shortcut_not_found_maps_to_404_with_id() {
        let id = Uuid::new_v4();
        let err: ApiError = satchel_core::Error::ShortcutNotFound(id).into();
        match err {
            ApiError::NotFound(msg) => assert!(msg.contains(&id.to_string())),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_database_errors_pass_through_as_500() {
        let err: ApiError = satchel_core::Error::Database(sqlx::Error::PoolTimedOut).into();
        match err {
            ApiError::Database(_) => {}
            other => panic!("Expected Database, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_origin_list() {
        let origins = parse_origin_list("https://a.example.com, https://b.example.com");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://a.example.com");

        assert!(parse_origin_list("").is_empty());
        assert!(parse_origin_list(" , ,").is_empty());
    }

    #[test]
    fn test_request_ids_are_uuid_v7() {
        let mut maker = MakeRequestUuidV7;
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        let id = maker.make_request_id(&request).expect("request id");
        let parsed =
            Uuid::parse_str(id.header_value().to_str().unwrap()).expect("valid uuid header");
        assert_eq!(parsed.get_version_num(), 7);
    }
}
