//! Error taxonomy for repository operations.
//!
//! Configuration errors are raised before any request leaves the process. Store rejections
//! are carried unmodified in [`Error::Store`]: nothing in this crate retries.

use aws_sdk_dynamodb::error;
use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the repository and its builders.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payload of an update did not carry the partition key.
    #[error(
        "the attribute \"{0}\" is required when updating a record, because it is the partition key"
    )]
    MissingPartitionKey(String),
    /// The table defines a sort key but no value was supplied for it.
    #[error("the attribute \"{0}\" is required in the primary key, because it is the sort key")]
    MissingSortKey(String),
    /// A required environment variable is not set.
    #[error("the environment variable {0} is required")]
    MissingEnvironmentVariable(&'static str),
    /// No record exists for the requested key.
    #[error("{0}")]
    NotFound(String),
    /// The table answered a describe request with a status other than `ACTIVE`.
    #[error("DynamoDB table status is not in healthy state: {0}")]
    TableNotActive(String),
    /// A value could not be converted to or from a DynamoDB attribute value.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
    /// An SDK request type could not be built.
    #[error(transparent)]
    Build(#[from] error::BuildError),
    /// The store rejected the request.
    #[error(transparent)]
    Store(Box<dyn std::error::Error + Send + Sync>),
}

impl<E, R> From<error::SdkError<E, R>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    fn from(err: error::SdkError<E, R>) -> Self {
        Self::Store(Box::new(err))
    }
}
