use thiserror::Error;

/// Errors produced when reading a rule tree from a generic payload.
///
/// Every variant carries the path of the offending node, e.g.
/// `$.sub_rules[1]`.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("expected a mapping at {path}")]
    NotAMapping { path: String },

    #[error("missing field '{field}' at {path}")]
    MissingField { path: String, field: &'static str },

    #[error("field '{field}' at {path} must be {expected}")]
    InvalidField {
        path: String,
        field: &'static str,
        expected: &'static str,
    },

    #[error("malformed {kind} rule at {path}: {source}")]
    MalformedLeaf {
        path: String,
        kind: &'static str,
        source: serde_json::Error,
    },
}

impl PayloadError {
    /// Path of the payload node that failed to parse.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            PayloadError::NotAMapping { path }
            | PayloadError::MissingField { path, .. }
            | PayloadError::InvalidField { path, .. }
            | PayloadError::MalformedLeaf { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_mapping_message() {
        let err = PayloadError::NotAMapping {
            path: "$.sub_rules[0]".into(),
        };
        assert_eq!(err.to_string(), "expected a mapping at $.sub_rules[0]");
        assert_eq!(err.path(), "$.sub_rules[0]");
    }

    #[test]
    fn missing_field_message() {
        let err = PayloadError::MissingField {
            path: "$".into(),
            field: "amount",
        };
        assert_eq!(err.to_string(), "missing field 'amount' at $");
    }

    #[test]
    fn invalid_field_message() {
        let err = PayloadError::InvalidField {
            path: "$".into(),
            field: "sub_rules",
            expected: "a list",
        };
        assert_eq!(err.to_string(), "field 'sub_rules' at $ must be a list");
    }
}
