use serde::{Deserialize, Serialize};

/// Envelope of every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub count: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_name: String,
    pub errors: Vec<String>,
}

// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = field_errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_counts_items() {
        let response = ListResponse::new(vec![1, 2, 3]);
        assert_eq!(response.count, 3);

        let decoded: ListResponse<u32> =
            serde_json::from_value(serde_json::json!({ "items": [7] })).unwrap();
        assert_eq!(decoded.items, vec![7]);
        assert_eq!(decoded.count, 0);
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(
            ErrorResponse::new(400, "validation failed").with_field_errors(vec![FieldError {
                field_name: "name".to_string(),
                errors: vec!["a value is required".to_string()],
            }]),
        )
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "code": 400,
                "message": "validation failed",
                "fieldErrors": [{ "fieldName": "name", "errors": ["a value is required"] }]
            })
        );
    }
}
