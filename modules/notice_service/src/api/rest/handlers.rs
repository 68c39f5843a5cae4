//! HTTP request handlers - thin layer that delegates to domain service

use crate::contract::Capability;
use crate::domain::render::{render_conditional_block, render_message_block};
use crate::domain::Service;
use super::{
    auth::Caller,
    dto::*,
    error::{map_domain_error, Problem},
};
use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

// ===== Settings Handlers =====

/// Get the normalized notice settings
#[utoipa::path(
    get,
    path = "/notiblock/v1/settings",
    tag = "notiblock",
    responses(
        (status = 200, description = "Current notice settings", body = NoticeSettingsDto),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Caller lacks the edit_posts capability"),
        (status = 500, description = "Option store failure")
    ),
    security(("bearer" = []))
)]
pub async fn get_settings(
    service: Arc<Service>,
    Caller(ctx): Caller,
) -> Result<Json<NoticeSettingsDto>, Problem> {
    service
        .authorize(&ctx, Capability::EditPosts)
        .map_err(map_domain_error)?;

    let mut store = service.store();
    let settings = store.get_settings(false).await.map_err(map_domain_error)?;

    Ok(Json(settings.into()))
}

// ===== Block Handlers =====

/// Render the message block for the current settings
#[utoipa::path(
    get,
    path = "/notiblock/v1/blocks/message",
    tag = "notiblock",
    params(("className" = Option<String>, Query, description = "Extra wrapper classes")),
    responses(
        (status = 200, description = "Rendered block", content_type = "text/html", body = String),
        (status = 204, description = "No message configured")
    )
)]
pub async fn render_message(
    service: Arc<Service>,
    Query(query): Query<BlockQuery>,
) -> Result<Response, Problem> {
    let mut store = service.store();
    let settings = store.get_settings(false).await.map_err(map_domain_error)?;

    Ok(html_fragment(render_message_block(
        &settings,
        query.class_name.as_deref(),
    )))
}

/// Render the conditional block around the posted inner HTML
#[utoipa::path(
    post,
    path = "/notiblock/v1/blocks/conditional",
    tag = "notiblock",
    params(("className" = Option<String>, Query, description = "Extra wrapper classes")),
    request_body(content = String, content_type = "text/html", description = "Rendered inner blocks"),
    responses(
        (status = 200, description = "Rendered block", content_type = "text/html", body = String),
        (status = 204, description = "Notice inactive or no inner content")
    )
)]
pub async fn render_conditional(
    service: Arc<Service>,
    Query(query): Query<BlockQuery>,
    inner_html: String,
) -> Result<Response, Problem> {
    let mut store = service.store();
    let active = service.is_active(&mut store).await.map_err(map_domain_error)?;

    Ok(html_fragment(render_conditional_block(
        active,
        &inner_html,
        query.class_name.as_deref(),
    )))
}

fn html_fragment(html: Option<String>) -> Response {
    match html {
        Some(html) => Html(html).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
