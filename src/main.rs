//! Student Roster Backend Server
//!
//! REST API server for managing the student roster.

use std::sync::Arc;
use student_roster_backend::api::create_router;
use student_roster_backend::config::Config;
use student_roster_backend::db::{DatabasePool, Student};
use student_roster_backend::error::ErrorResponse;
use student_roster_backend::models::{DeleteStudentResponse, HealthResponse, StudentPayload};
use student_roster_backend::state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        student_roster_backend::api::handlers::health_check,
        student_roster_backend::api::handlers::list_students,
        student_roster_backend::api::handlers::create_student,
        student_roster_backend::api::handlers::update_student,
        student_roster_backend::api::handlers::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            Student,
            StudentPayload,
            DeleteStudentResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Students", description = "Student roster management"),
    ),
    info(
        title = "Student Roster API",
        version = "0.1.0",
        description = "REST API for managing a student roster",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The pool dials lazily; report reachability without blocking startup.
    let db = DatabasePool::connect_lazy(&config.database);
    let probe = db.clone();
    tokio::spawn(async move {
        match probe.ping().await {
            Ok(()) => info!("Database reachable"),
            Err(e) => warn!("Database not reachable yet: {}", e),
        }
    });

    let state = Arc::new(AppState::with_database(db));

    let host = &config.server.host;
    let port = config.server.port;

    info!("Starting Student Roster Backend on {}:{}", host, port);
    info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        host, port
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
