use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use log::{error, info};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::error::AppError;
use crate::store::{LeadInput, RecordStore};

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

/// Builds the router: a single endpoint answering list (GET), create (POST)
/// and preflight (OPTIONS). Each request is fully self-contained.
pub fn router(store: Arc<dyn RecordStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/", get(list_leads).post(create_lead).options(preflight))
        .with_state(state)
}

pub async fn run(
    addr: &str,
    store: Arc<dyn RecordStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(store);

    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

// The caller is always a foreign-origin browser client; a response missing
// these headers is suppressed by the browser, error bodies included. So the
// set goes on every path, success and failure alike.
fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers
}

fn shaped(status: StatusCode, body: Value) -> Response {
    (status, cors_headers(), Json(body)).into_response()
}

fn failure(status: StatusCode, error: impl ToString) -> Response {
    shaped(status, json!({ "success": false, "error": error.to_string() }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!("request failed: {self}");
        failure(status, self)
    }
}

async fn preflight() -> impl IntoResponse {
    let mut headers = cors_headers();
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );

    (StatusCode::OK, headers)
}

/// Create: parse the body into a lead, stamp it with current server time,
/// append it as the new last row.
async fn create_lead(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    // parsed by hand so malformed bodies take the shaped error path
    // instead of a framework rejection without CORS headers
    let lead: LeadInput = serde_json::from_slice(&body)?;

    state.store.append(&lead, Local::now())?;

    Ok(shaped(
        StatusCode::OK,
        json!({ "success": true, "message": "Data saved successfully" }),
    ))
}

/// List: the full grid as a JSON array of objects keyed by the lower-cased
/// header names.
async fn list_leads(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let rows = state.store.read_all()?;

    Ok(shaped(StatusCode::OK, Value::Array(rows_to_leads(&rows))))
}

/// Converts raw grid rows into one object per data row. Row 0 supplies the
/// field names (lower-cased), absent cells become empty strings, and rows
/// with nothing in any tracked column are blanks, not data.
pub fn rows_to_leads(rows: &[Vec<String>]) -> Vec<Value> {
    if rows.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = rows[0].iter().map(|h| h.to_lowercase()).collect();

    rows[1..]
        .iter()
        .map(|row| {
            let mut lead = Map::new();
            for (i, name) in headers.iter().enumerate() {
                let cell = row.get(i).cloned().unwrap_or_default();
                lead.insert(name.clone(), Value::String(cell));
            }
            Value::Object(lead)
        })
        .filter(|lead| {
            ["name", "email", "phone", "message", "date"]
                .iter()
                .any(|key| {
                    lead.get(*key)
                        .and_then(Value::as_str)
                        .is_some_and(|cell| !cell.is_empty())
                })
        })
        .collect()
}
