use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Failure talking to the data service.
#[derive(Debug, Error)]
pub enum RestError {
    /// The data service answered with an error status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<String>,
        hint: Option<String>,
    },

    #[error("Data service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode data service response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A single-row query matched several rows.
    #[error("Query returned {0} rows, expected at most one")]
    MultipleRows(usize),

    /// A write matched no rows.
    #[error("{0} not found")]
    NotFound(String),
}

/// Error body returned by the REST layer, e.g.
/// `{"code":"42P01","message":"relation does not exist","details":null,"hint":null}`.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    code: Option<Value>,
    details: Option<Value>,
    hint: Option<Value>,
}

impl RestError {
    /// Build an [`RestError::Api`] from a non-success response.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => RestError::Api {
                status,
                message: parsed
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("Data service returned status {status}")),
                code: parsed.code.and_then(value_text),
                details: parsed.details.and_then(value_text),
                hint: parsed.hint.and_then(value_text),
            },
            Err(_) => RestError::Api {
                status,
                message: if body.trim().is_empty() {
                    format!("Data service returned status {status}")
                } else {
                    body.trim().to_string()
                },
                code: None,
                details: None,
                hint: None,
            },
        }
    }

    /// True for errors the data service reported about the query itself, as
    /// opposed to transport or decoding failures on our side.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            RestError::Api { .. } | RestError::MultipleRows(_) | RestError::NotFound(_)
        )
    }

    /// True when the data service rejected the credentials: the message
    /// mentions `invalid` or `api key`, case-insensitively.
    pub fn is_credential_error(&self) -> bool {
        match self {
            RestError::Api { message, .. } => {
                let message = message.to_lowercase();
                message.contains("invalid") || message.contains("api key")
            }
            _ => false,
        }
    }

    /// Diagnostic fields worth showing to a developer.
    pub fn diagnostics(&self) -> Option<Value> {
        match self {
            RestError::Api {
                status,
                code,
                details,
                hint,
                ..
            } => Some(json!({
                "status": status,
                "code": code,
                "details": details,
                "hint": hint,
            })),
            RestError::MultipleRows(rows) => Some(json!({ "rows": rows })),
            _ => None,
        }
    }
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
