use chrono::{DateTime, Local, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FetchError;

lazy_static! {
    static ref HTML_MARKER: Regex = Regex::new(r"(?i)<!doctype\s+html|<html[\s>]").unwrap();
}

/// One lead in the canonical shape presented to callers, whatever casing
/// the endpoint emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Date")]
    pub date: String,
}

/// The shapes a response body has been observed to take. Contents are only
/// touched after the shape is settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An HTML document where data was expected: the deployment is broken.
    Document,
    /// A candidate list of record-like values.
    Records(Vec<Value>),
    /// The endpoint explicitly reported a failure.
    Failure(String),
}

/// Classifies a raw response body.
///
/// HTML markers win over everything, a JSON array is taken as-is, an object
/// with `success: false` is a reported failure, and any other object may
/// wrap the list under a `data` or `leads` key. Unparseable non-HTML text
/// and scalars yield an empty candidate list rather than an error.
pub fn detect_payload(body: &str) -> Payload {
    if HTML_MARKER.is_match(body) {
        return Payload::Document;
    }

    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return Payload::Records(Vec::new()),
    };

    match parsed {
        Value::Array(records) => Payload::Records(records),
        Value::Object(obj) => {
            if obj.get("success") == Some(&Value::Bool(false)) {
                let message = obj
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("the endpoint returned an error")
                    .to_string();
                return Payload::Failure(message);
            }

            let records = ["data", "leads"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_array).cloned())
                .unwrap_or_default();
            Payload::Records(records)
        }
        _ => Payload::Records(Vec::new()),
    }
}

/// Turns a classified payload into canonical leads, newest first.
///
/// Candidates without a name or email are dropped, field access accepts
/// both capitalized and lower-case keys (capitalized first), and the stored
/// order is reversed so the last-appended lead leads the list. An empty
/// result with no error is the "no leads" condition, a notice for the
/// caller rather than a failure.
pub fn normalize(payload: Payload) -> Result<Vec<Lead>, FetchError> {
    let records = match payload {
        Payload::Document => return Err(FetchError::UpstreamConfiguration),
        Payload::Failure(message) => return Err(FetchError::UpstreamLogic(message)),
        Payload::Records(records) => records,
    };

    let mut leads: Vec<Lead> = records
        .iter()
        .filter_map(Value::as_object)
        .filter(|obj| {
            !field(obj, &["Name", "name"]).is_empty()
                || !field(obj, &["Email", "email"]).is_empty()
        })
        .map(|obj| Lead {
            name: field(obj, &["Name", "name"]),
            email: field(obj, &["Email", "email"]),
            phone: field(obj, &["Phone", "phone"]),
            message: field(obj, &["Message", "message"]),
            date: format_date(&field(obj, &["Date", "date", "timestamp"])),
        })
        .collect();

    leads.reverse();
    Ok(leads)
}

/// First non-empty value among `keys`, tried in priority order. Numbers and
/// bools are rendered as text so numeric phone cells survive.
fn field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(text))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Renders a stored timestamp as local `date time`. Unparseable values pass
/// through untouched.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return parsed.format("%Y-%m-%d %H:%M").to_string();
        }
    }

    // timestamp cells are conventionally epoch milliseconds
    if let Ok(millis) = raw.parse::<i64>() {
        if let Some(parsed) = DateTime::<Utc>::from_timestamp_millis(millis) {
            return parsed
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();
        }
    }

    raw.to_string()
}
