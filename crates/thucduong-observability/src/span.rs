//! Request identifiers and operation spans.

use tracing::Span;

/// Unique request identifier for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span covering one catalog operation.
pub fn operation_span(request_id: &RequestId, operation: &'static str) -> Span {
    tracing::info_span!("catalog", request_id = %request_id, operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }

    #[test]
    fn test_display_is_uuid() {
        let id = RequestId::generate().to_string();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
