//! OData V4 JSON payload shapes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{error, warn};

use crate::domain::errors::DomainError;
use crate::services::entity_router::EntitySet;

/// Render a read result the way OData V4 JSON clients expect it.
///
/// Collections become `{"@odata.context": ..., "value": [...]}`; keyed reads
/// become the entity object annotated with `/$entity` context.
pub fn entity_set_payload(set: EntitySet) -> Value {
    if set.single {
        let context = format!("$metadata#{}/$entity", set.entity);
        let mut object = match set.records.into_iter().next() {
            Some(Value::Object(object)) => object,
            Some(other) => {
                let mut object = Map::new();
                object.insert("value".to_string(), other);
                object
            }
            None => Map::new(),
        };
        object.insert("@odata.context".to_string(), Value::String(context));
        Value::Object(object)
    } else {
        json!({
            "@odata.context": format!("$metadata#{}", set.entity),
            "value": set.records,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ODataErrorBody {
    pub error: ODataErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ODataErrorDetail {
    pub code: String,
    pub message: String,
}

/// A domain error on its way out through the HTTP boundary.
#[derive(Debug)]
pub struct ODataError(pub DomainError);

impl From<DomainError> for ODataError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ODataError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            DomainError::NotFound { .. } | DomainError::UnknownEntity { .. } => StatusCode::NOT_FOUND,
            DomainError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            DomainError::RemoteSource(_) => StatusCode::BAD_GATEWAY,
            DomainError::MultipleResults { .. }
            | DomainError::DatabaseError(_)
            | DomainError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ODataError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "request failed");
        } else {
            warn!(code = self.0.code(), error = %self.0, "request rejected");
        }

        error_response(status, self.0.code(), self.0.to_string())
    }
}

/// An OData error body with the given status.
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = ODataErrorBody {
        error: ODataErrorDetail {
            code: code.to_string(),
            message: message.into(),
        },
    };
    (status, Json(body)).into_response()
}
