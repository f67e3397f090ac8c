use std::any::Any;

use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware, routing::get};
use schoolhub_core::AppError;
use schoolhub_observability::{logging_middleware, metrics_middleware, metrics_router};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::auth::authenticate;
use crate::modules::classrooms::router::init_classrooms_router;
use crate::modules::schools::router::init_schools_router;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;

async fn hello() -> &'static str {
    "Hello World!"
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    AppError::fallback(
        StatusCode::INTERNAL_SERVER_ERROR,
        anyhow::anyhow!("Internal Server Error"),
    )
    .into_response()
}

/// `path/` is served as `path`. Routes are matched exactly, so only unmatched
/// requests get here; anything else unmatched stays a bare 404.
async fn retry_without_trailing_slash(routes: Router, req: Request) -> Response {
    let path = req.uri().path();
    if path.len() <= 1 || !path.ends_with('/') {
        return StatusCode::NOT_FOUND.into_response();
    }

    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    let path_and_query = match req.uri().query() {
        Some(query) => format!("{trimmed}?{query}"),
        None => trimmed.to_string(),
    };
    let Ok(uri) = Uri::builder().path_and_query(path_and_query).build() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let (mut parts, body) = req.into_parts();
    parts.uri = uri;
    match routes.oneshot(Request::from_parts(parts, body)).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/schools", init_schools_router())
        .nest("/classrooms", init_classrooms_router())
        .nest("/students", init_students_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let mut router = Router::new()
        .route("/", get(hello))
        .nest("/api", api)
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()));

    if let Some(handle) = state.metrics.clone() {
        router = router.merge(metrics_router(handle));
    }

    let routes = router.with_state(state.clone());
    let exact_routes = routes.clone();

    routes
        .fallback(move |req: Request| retry_without_trailing_slash(exact_routes.clone(), req))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
