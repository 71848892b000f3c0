use serde::Deserialize;
use thiserror::Error;

/// Text GitHub puts in the error message when it silently throttles
/// issue creation.
pub const SUBMITTED_TOO_QUICKLY: &str = "was submitted too quickly";

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("GitHub returned HTTP {status}: {body}")]
    Transport {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("HTTP request error: {0}")]
    Http(String),

    #[error("GitHub API error: {}", join_messages(.errors))]
    Api { errors: Vec<GraphqlError> },

    #[error("rate limited: {message}")]
    RateLimited { message: String },

    #[error(
        "still rate limited after {attempts} attempts; the cooldown strategy did not recover, aborting"
    )]
    RetryExhausted { attempts: u32 },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("column {field:?} has value {value:?}, which is not a number")]
    InvalidNumber { field: String, value: String },

    #[error("unexpected {operation} response: {detail}")]
    UnexpectedResponse {
        operation: &'static str,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, MigrateError>;

impl MigrateError {
    /// Classify a GraphQL `errors` array. Only the first message decides
    /// whether the failure is the retryable "submitted too quickly" kind.
    pub fn from_graphql_errors(errors: Vec<GraphqlError>) -> Self {
        match errors.first() {
            Some(first) if is_rate_limited(&first.message) => Self::RateLimited {
                message: first.message.clone(),
            },
            _ => Self::Api { errors },
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for MigrateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Whether an upstream error message is GitHub's creation throttle.
pub fn is_rate_limited(message: &str) -> bool {
    message.contains(SUBMITTED_TOO_QUICKLY)
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gql_error(message: &str) -> GraphqlError {
        GraphqlError {
            message: message.to_string(),
        }
    }

    #[test]
    fn submitted_too_quickly_is_rate_limited() {
        let err = MigrateError::from_graphql_errors(vec![gql_error(
            "was submitted too quickly",
        )]);
        assert!(matches!(err, MigrateError::RateLimited { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn rate_limit_match_is_substring() {
        assert!(is_rate_limited(
            "Issue was submitted too quickly. Please wait and try again."
        ));
        assert!(!is_rate_limited("Submitted Too Quickly"));
    }

    #[test]
    fn only_first_error_is_inspected() {
        let err = MigrateError::from_graphql_errors(vec![
            gql_error("Could not resolve to a node with the global id of 'x'"),
            gql_error("was submitted too quickly"),
        ]);
        match err {
            MigrateError::Api { errors } => assert_eq!(errors.len(), 2),
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn api_error_message_lists_every_error() {
        let err = MigrateError::from_graphql_errors(vec![gql_error("first"), gql_error("second")]);
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "GitHub API error: first; second");
    }

    #[test]
    fn retry_exhausted_names_the_cooldown() {
        let err = MigrateError::RetryExhausted { attempts: 16 };
        let msg = err.to_string();
        assert!(msg.contains("16 attempts"));
        assert!(msg.contains("cooldown"));
    }
}
