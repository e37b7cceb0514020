use crate::api::{AppointmentPayload, AppointmentResponse};
use crate::appointment::AppointmentApp;
use crate::error::{error_response, AppointmentError, INTERNAL_SERVER_ERROR};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
};
use tracing::{error, trace};

async fn handle_appointment(
    State(app): State<Arc<AppointmentApp>>,
    body: Bytes,
) -> Result<Json<AppointmentResponse>, AppointmentError> {
    trace!("Appointment request with {} byte body", body.len());
    let payload = AppointmentPayload::from_body(&body);
    app.handle_new_appointment(payload).await.map(Json)
}

async fn handle_health() -> StatusCode {
    StatusCode::OK
}

/// The panic payload is logged only, the client gets the generic message.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    if let Some(message) = panic.downcast_ref::<String>() {
        error!("Handler panicked: {}", message);
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        error!("Handler panicked: {}", message);
    } else {
        error!("Handler panicked with a non-string payload");
    }
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

fn appointment_api(app: Arc<AppointmentApp>) -> Router {
    Router::new()
        .route("/appointment", post(handle_appointment))
        .route("/health", get(handle_health))
        .with_state(app)
}

/// Panic recovery, compression and CORS shared by every route.
pub fn with_middleware(router: Router) -> Router {
    let middleware = tower::ServiceBuilder::new()
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new().quality(tower_http::CompressionLevel::Fastest))
        .layer(CorsLayer::permissive());

    router.layer(middleware)
}

pub fn router(app: Arc<AppointmentApp>) -> Router {
    with_middleware(Router::new().nest("/api", appointment_api(app)))
}
