//! Error types for the Widget operator core

use thiserror::Error;

use crate::client::ClientError;

/// Main error type for Widget operator operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Kubernetes API error
    #[error("kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Validation error for Widget specs
    #[error("validation error: {0}")]
    Validation(String),

    /// The embedded CRD manifest could not be decoded
    ///
    /// The manifest is compiled into the binary, so this indicates a build
    /// defect rather than a runtime condition.
    #[error("unable to decode the {name} CRD: {source}")]
    CrdDecode {
        /// Kind name of the definition that failed to decode
        name: String,
        /// The underlying deserialization failure
        #[source]
        source: serde_yaml::Error,
    },

    /// The API server rejected creation of a CRD
    #[error("unable to create the {name} CRD: {source}")]
    CrdCreate {
        /// Kind name of the definition that failed to install
        name: String,
        /// The classified creation failure
        #[source]
        source: ClientError,
    },
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
