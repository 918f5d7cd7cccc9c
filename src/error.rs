//! Builder error types
//!
//! Defines all error conditions that can occur while validating and rendering
//! a Flux query. Rendering is a pure validate-then-format operation: every
//! failure is returned to the immediate caller and aborts the render of the
//! enclosing query without partial output.

use thiserror::Error;

/// Errors that can occur during query construction and rendering
#[derive(Error, Debug)]
pub enum FluxError {
    /// A duration token does not match the Flux duration grammar
    #[error("invalid duration value: {0}, expected one or more <digits><unit> groups (ns|us|ms|s|m|h|d|w|mo|y)")]
    MalformedDuration(String),

    /// A filter node rendered with zero populated conditions
    #[error("empty predicate filter")]
    EmptyPredicate,

    /// Neither start nor stop was set on the query range
    #[error("start and stop are required: at least one must be set")]
    MissingRange,

    /// A stage field failed domain validation
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dynamic decode requested for a name absent from the registry
    #[error("invalid transform name: {0}")]
    UnknownTransform(String),

    /// A generic parameter bag could not be coerced into a stage's typed fields
    #[error("decode error for transform {name}: {source}")]
    Decode {
        /// Stage name the decode was attempted for
        name: String,
        /// Underlying deserialization failure
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for builder operations
pub type FluxResult<T> = Result<T, FluxError>;
