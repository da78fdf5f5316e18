//! Server-rendered admin panel
//!
//! Same services as the JSON API, rendered through Tera templates compiled
//! into the binary. A failed form submission redirects back to the form with
//! the message in an `error` query parameter.

pub mod customers;
pub mod hotels;
pub mod rooms;

use super::state::AppState;
use crate::core::{PaginationMeta, ServiceError};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("pager.html", include_str!("templates/pager.html")),
    ("hotels/list.html", include_str!("templates/hotels/list.html")),
    ("hotels/form.html", include_str!("templates/hotels/form.html")),
    ("hotels/show.html", include_str!("templates/hotels/show.html")),
    ("rooms/list.html", include_str!("templates/rooms/list.html")),
    ("rooms/form.html", include_str!("templates/rooms/form.html")),
    ("rooms/new.html", include_str!("templates/rooms/new.html")),
    ("rooms/show.html", include_str!("templates/rooms/show.html")),
    ("customers/list.html", include_str!("templates/customers/list.html")),
];

/// Compile the embedded templates
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

/// State of the admin routes
#[derive(Clone)]
pub struct AdminState {
    pub app: AppState,
    pub templates: Arc<Tera>,
}

impl AdminState {
    pub fn new(app: AppState) -> Result<Self, tera::Error> {
        Ok(Self {
            app,
            templates: Arc::new(templates()?),
        })
    }

    fn render(&self, name: &str, context: &Context) -> Result<Html<String>, AdminError> {
        Ok(Html(self.templates.render(name, context)?))
    }
}

/// Admin routes, mounted under `/admin`
pub fn admin_routes(state: AdminState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/admin/hotels") }))
        .route("/hotels", get(hotels::index).post(hotels::create))
        .route("/hotels/new", get(hotels::new_form))
        .route("/hotels/{code}", get(hotels::show).post(hotels::update))
        .route("/hotels/{code}/edit", get(hotels::edit_form))
        .route("/hotels/{code}/delete", post(hotels::delete))
        .route("/hotels/{code}/rooms", post(hotels::create_room))
        .route("/hotels/{code}/rooms/new", get(hotels::new_room_form))
        .route(
            "/hotels/{code}/rooms/{room_code}/delete",
            post(hotels::delete_room),
        )
        .route("/rooms", get(rooms::index))
        .route("/rooms/new", get(rooms::new_form))
        .route("/rooms/create", post(rooms::create))
        .route("/rooms/{code}", get(rooms::show).post(rooms::update))
        .route("/rooms/{code}/edit", get(rooms::edit_form))
        .route("/rooms/{code}/delete", post(rooms::delete))
        .route("/customers", get(customers::index))
        .with_state(state)
}

/// `?error=` message carried across a redirect
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flash {
    pub error: Option<String>,
}

/// Page links for the pager macro
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pager {
    pub total_pages: u64,
    pub prev: Option<u64>,
    pub next: Option<u64>,
}

impl From<&PaginationMeta> for Pager {
    fn from(meta: &PaginationMeta) -> Self {
        Self {
            total_pages: meta.total_pages(),
            prev: meta.has_prev().then(|| meta.current_page - 1),
            next: meta.has_next().then(|| meta.current_page + 1),
        }
    }
}

/// Failure that cannot be shown on a form
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self {
            AdminError::Service(e) => e.status_code(),
            AdminError::Template(e) => {
                tracing::error!(error = ?e, "admin template failed to render");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if let AdminError::Service(ServiceError::Storage(e)) = &self {
            tracing::error!(error = %e, "document store failure");
        }
        (status, Html(format!("<h1>{}</h1><p>{}</p>", status, self))).into_response()
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Redirect to `target`, or back to `on_error` with the message when the
/// failure is the client's doing
pub fn redirect_or_flash<T>(
    result: Result<T, ServiceError>,
    target: impl FnOnce(T) -> String,
    on_error: &str,
) -> AdminResult<Redirect> {
    match result {
        Ok(value) => Ok(Redirect::to(&target(value))),
        Err(e) if e.status_code().is_client_error() => {
            tracing::warn!(error = %e, "admin form rejected");
            Ok(Redirect::to(&with_error(on_error, &e.to_string())))
        }
        Err(e) => Err(e.into()),
    }
}

/// Append `error=<message>` to a path
pub fn with_error(path: &str, message: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}error={}", path, separator, urlencoded(message))
}

/// Encode `key=value&` pairs for pager links, skipping empty values
pub fn query_prefix(pairs: &[(&str, Option<&str>)]) -> String {
    pairs
        .iter()
        .filter_map(|(key, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}={}&", key, urlencoded(v)))
        })
        .collect()
}

/// Turn a form field into JSON: blank is null, integers become numbers
pub fn form_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Value::Null
    } else if let Ok(number) = trimmed.parse::<i64>() {
        Value::from(number)
    } else {
        Value::from(trimmed)
    }
}

/// Turn a free-text form field into JSON: blank is null, anything else a trimmed string
pub fn form_text(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::from(trimmed)
    }
}

/// Simple URL encoding for query parameters.
fn urlencoded(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(ch),
            ' ' => result.push('+'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}
