use serde::Serialize;

/// Message reported for any transport-level failure (refused, timed out, DNS).
pub const CONNECTION_ERROR_MESSAGE: &str = "A connection error has occurred.";

/// Normalized outcome of one remote call.
///
/// Gateways never surface transport errors: every call ends in one of these
/// two variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApiResponse<T> {
    Success {
        data: T,
        message: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::Success {
            data,
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn connection_error() -> Self {
        Self::failure(CONNECTION_ERROR_MESSAGE)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Server message, if any, for either variant.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failure { message } => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success { data, message } => ApiResponse::Success {
                data: f(data),
                message,
            },
            Self::Failure { message } => ApiResponse::Failure { message },
        }
    }

    /// Splits into the payload or the failure message.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { message } => Err(message),
        }
    }
}

/// Payload of a list call: records, or the backend's soft "nothing here" reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum RecordList<T> {
    Found(Vec<T>),
    /// HTTP 404 on a list endpoint; not an error.
    NotFound {
        detail: Option<String>,
    },
}

impl<T> RecordList<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Found(items) => items,
            Self::NotFound { .. } => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Found(items) => items.is_empty(),
            Self::NotFound { .. } => true,
        }
    }
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self::Found(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_responses_serialize() {
        let found = serde_json::to_value(ApiResponse::success(RecordList::Found(vec![1, 2]))).unwrap();
        assert_eq!(
            found,
            json!({
                "status": "success",
                "data": {"kind": "found", "items": [1, 2]},
                "message": null
            })
        );

        let missing: RecordList<u32> = RecordList::NotFound {
            detail: Some("No feedings found".to_string()),
        };
        assert_eq!(
            serde_json::to_value(missing).unwrap(),
            json!({"kind": "not_found", "items": {"detail": "No feedings found"}})
        );
    }

    #[test]
    fn map_keeps_message() {
        let response = ApiResponse::success_with_message(2, "ok").map(|n| n * 10);
        assert_eq!(response, ApiResponse::success_with_message(20, "ok"));
    }

    #[test]
    fn connection_error_is_a_failure() {
        let response: ApiResponse<()> = ApiResponse::connection_error();
        assert!(!response.is_success());
        assert_eq!(response.message(), Some(CONNECTION_ERROR_MESSAGE));
        assert_eq!(
            response.into_result(),
            Err(CONNECTION_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn soft_not_found_reads_as_empty() {
        let list: RecordList<u8> = RecordList::NotFound {
            detail: Some("No feedings".to_string()),
        };
        assert!(list.is_empty());
        assert!(list.into_vec().is_empty());
    }
}
