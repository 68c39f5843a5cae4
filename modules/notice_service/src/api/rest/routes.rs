//! Route registration and OpenAPI document

use crate::domain::Service;
use super::{auth::Caller, auth::TokenRegistry, dashboard, dto::*, handlers};
use axum::{
    extract::Query,
    response::{Html, Response},
    routing::get,
    Extension, Form, Json, Router,
};
use std::sync::Arc;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

/// Path prefix shared by every notice endpoint
pub const API_PREFIX: &str = "/notiblock/v1";

#[derive(OpenApi)]
#[openapi(
    paths(handlers::get_settings, handlers::render_message, handlers::render_conditional),
    components(schemas(NoticeSettingsDto)),
    modifiers(&BearerAuth),
    tags((name = "notiblock", description = "Site-wide notice settings and blocks"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Register all REST routes
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    tokens: Arc<TokenRegistry>,
) -> Router {
    router
        .route(&format!("{API_PREFIX}/settings"), get(get_settings_handler))
        .route(
            &format!("{API_PREFIX}/dashboard"),
            get(show_dashboard_handler).post(submit_dashboard_handler),
        )
        .route(&format!("{API_PREFIX}/blocks/message"), get(render_message_handler))
        .route(
            &format!("{API_PREFIX}/blocks/conditional"),
            axum::routing::post(render_conditional_handler),
        )
        .route(&format!("{API_PREFIX}/openapi.json"), get(openapi_handler))
        // Add service and token table as extensions for handlers
        .layer(Extension(service))
        .layer(Extension(tokens))
}

// ===== Handler wrappers that extract service from Extension =====

async fn get_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
) -> Result<Json<NoticeSettingsDto>, super::error::Problem> {
    handlers::get_settings(service, caller).await
}

async fn show_dashboard_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
) -> Result<Html<String>, super::error::Problem> {
    dashboard::show_dashboard(service, caller).await
}

async fn submit_dashboard_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: Caller,
    form: Form<DashboardForm>,
) -> Result<Html<String>, super::error::Problem> {
    dashboard::submit_dashboard(service, caller, form).await
}

async fn render_message_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<BlockQuery>,
) -> Result<Response, super::error::Problem> {
    handlers::render_message(service, query).await
}

async fn render_conditional_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<BlockQuery>,
    inner_html: String,
) -> Result<Response, super::error::Problem> {
    handlers::render_conditional(service, query, inner_html).await
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
