//! Admin dashboard form: renders the settings form and handles submissions

use crate::contract::{AuthContext, Capability, NoticeError, NoticeSettings, NoticeStatus};
use crate::domain::render::escape_html;
use crate::domain::{Service, SAVE_SETTINGS_ACTION};
use super::{
    auth::Caller,
    dto::DashboardForm,
    error::{map_domain_error, Problem},
};
use axum::{response::Html, Form};
use std::fmt::Write;
use std::sync::Arc;

const SAVED_MESSAGE: &str = "Settings saved successfully.";
const SAVE_FAILED_MESSAGE: &str = "Error saving settings.";

/// Outcome banner shown above the form after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

impl FormMessage {
    fn css_class(&self) -> &'static str {
        match self {
            Self::Success(_) => "notice-success",
            Self::Error(_) => "notice-error",
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }
}

/// Show the settings form
pub async fn show_dashboard(
    service: Arc<Service>,
    Caller(ctx): Caller,
) -> Result<Html<String>, Problem> {
    service
        .authorize(&ctx, Capability::ManageOptions)
        .map_err(map_domain_error)?;

    let mut store = service.store();
    let settings = store.get_settings(false).await.map_err(map_domain_error)?;

    Ok(Html(render_dashboard(&service, &ctx, &settings, None)))
}

/// Handle a settings form submission and re-render the form
pub async fn submit_dashboard(
    service: Arc<Service>,
    Caller(ctx): Caller,
    Form(form): Form<DashboardForm>,
) -> Result<Html<String>, Problem> {
    service
        .authorize(&ctx, Capability::ManageOptions)
        .map_err(map_domain_error)?;

    let mut store = service.store();

    let message = if form.notiblock_save_settings.is_some() {
        let nonce = form.notiblock_nonce.as_deref().unwrap_or_default();
        if !service
            .nonces()
            .verify(nonce, SAVE_SETTINGS_ACTION, ctx.nonce_subject())
        {
            tracing::warn!(user = ctx.nonce_subject(), "rejected dashboard submission with invalid nonce");
            return Err(map_domain_error(NoticeError::InvalidNonce));
        }

        let message = match store.save_settings(&form.into_raw()).await {
            Ok(()) => FormMessage::Success(SAVED_MESSAGE.to_string()),
            Err(NoticeError::Validation { message, .. }) => FormMessage::Error(message),
            Err(e) => {
                tracing::error!(error = %e, "dashboard save failed");
                FormMessage::Error(SAVE_FAILED_MESSAGE.to_string())
            }
        };
        Some(message)
    } else {
        None
    };

    let settings = store.get_settings(false).await.map_err(map_domain_error)?;

    Ok(Html(render_dashboard(&service, &ctx, &settings, message.as_ref())))
}

/// Render the settings form; every interpolated value is HTML-escaped
pub fn render_dashboard(
    service: &Service,
    ctx: &AuthContext,
    settings: &NoticeSettings,
    message: Option<&FormMessage>,
) -> String {
    let nonce = service
        .nonces()
        .create(SAVE_SETTINGS_ACTION, ctx.nonce_subject());

    let mut html = String::from("<div class=\"wrap notiblock-dashboard\">\n<h1>Notiblock</h1>\n");

    if let Some(message) = message {
        let _ = writeln!(
            html,
            "<div class=\"notice {} inline\"><p>{}</p></div>",
            message.css_class(),
            escape_html(message.text())
        );
    }

    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"\">\n\
         <input type=\"hidden\" id=\"notiblock_nonce\" name=\"notiblock_nonce\" value=\"{}\" />",
        escape_html(&nonce)
    );

    let _ = writeln!(
        html,
        "<p><label for=\"notiblock_content\"><strong>Notification Message:</strong></label></p>\n\
         <textarea id=\"notiblock_content\" name=\"notiblock_content\" rows=\"6\" class=\"large-text\">{}</textarea>",
        escape_html(&settings.content)
    );

    date_input(
        &mut html,
        "notiblock_start_date",
        "Start Date:",
        &settings.start_date,
        "Leave empty for no start date restriction.",
    );
    date_input(
        &mut html,
        "notiblock_end_date",
        "End Date:",
        &settings.end_date,
        "Leave empty for no end date restriction.",
    );

    let _ = writeln!(
        html,
        "<p><label for=\"notiblock_always_show\">\
         <input type=\"checkbox\" id=\"notiblock_always_show\" name=\"notiblock_always_show\" value=\"1\"{} /> \
         <strong>Always show (ignore date range)</strong></label></p>",
        if settings.always_show { " checked=\"checked\"" } else { "" }
    );

    if let Some(status) = service.status(settings) {
        status_panel(&mut html, &status);
    }

    html.push_str(
        "<p><input type=\"submit\" name=\"notiblock_save_settings\" id=\"notiblock_save_settings\" \
         class=\"button button-primary\" value=\"Save Settings\" /></p>\n</form>\n</div>\n",
    );

    html
}

fn date_input(html: &mut String, name: &str, label: &str, value: &str, hint: &str) {
    let _ = writeln!(
        html,
        "<p><label for=\"{name}\"><strong>{label}</strong></label><br />\n\
         <input type=\"date\" id=\"{name}\" name=\"{name}\" value=\"{}\" class=\"regular-text\" /><br />\n\
         <span class=\"description\">{hint}</span></p>",
        escape_html(value)
    );
}

fn status_panel(html: &mut String, status: &NoticeStatus) {
    let class = if status.active { "notice-success" } else { "notice-warning" };
    let _ = write!(
        html,
        "<div class=\"notice {class} inline notiblock-status\"><p><strong>Current Status:</strong> {}",
        status.label()
    );
    if let Some(period) = &status.period {
        let _ = write!(html, " — {}", escape_html(period));
    }
    html.push_str("</p></div>\n");
}
