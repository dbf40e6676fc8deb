//! Classified resource-client boundary over the Kubernetes API
//!
//! The registrar and the assertion chain consume the remote store through
//! the [`ResourceClient`] trait rather than `kube::Api` directly. The trait
//! surface is deliberately small: create a CRD, fetch a Widget by identity.
//! Remote failures cross this boundary as a closed [`ClientError`]
//! classification so that idempotency ("already exists is fine") and
//! existence checks ("not found is the expected outcome") can match on
//! error kinds exhaustively.

use async_trait::async_trait;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{Api, PostParams};
use kube::Client;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::crd::Widget;

/// Identity of a single namespaced resource instance
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    /// Namespace the resource lives in
    pub namespace: String,
    /// Name of the resource within its namespace
    pub name: String,
}

impl ResourceIdentity {
    /// Create an identity from a namespace and a name
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Classified outcome of a failed remote operation
///
/// `AlreadyExists` and `NotFound` are expected, classified outcomes rather
/// than genuine failures; callers match on them to implement idempotent
/// creation and existence checks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The resource already exists in the remote store
    #[error("the resource already exists")]
    AlreadyExists,

    /// The resource was not found in the remote store
    #[error("the resource was not found")]
    NotFound,

    /// Any other Kubernetes API failure
    #[error(transparent)]
    Api(kube::Error),
}

impl ClientError {
    /// Returns true for the "already exists" classification
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists)
    }

    /// Returns true for the "not found" classification
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<kube::Error> for ClientError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ref response) if response.code == 409 => Self::AlreadyExists,
            kube::Error::Api(ref response) if response.code == 404 => Self::NotFound,
            other => Self::Api(other),
        }
    }
}

/// Remote resource operations consumed by the operator core
///
/// This trait abstracts the Kubernetes client for testability.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Submit a CustomResourceDefinition for creation
    async fn create_crd(&self, crd: &CustomResourceDefinition) -> Result<(), ClientError>;

    /// Fetch the Widget with the given identity
    async fn get_widget(&self, id: &ResourceIdentity) -> Result<Widget, ClientError>;
}

/// Production [`ResourceClient`] backed by a `kube::Client`
#[derive(Clone)]
pub struct KubeResourceClient {
    client: Client,
}

impl KubeResourceClient {
    /// Create a resource client from a Kubernetes client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceClient for KubeResourceClient {
    async fn create_crd(&self, crd: &CustomResourceDefinition) -> Result<(), ClientError> {
        let api: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        api.create(&PostParams::default(), crd)
            .await
            .map(|_| ())
            .map_err(ClientError::from)
    }

    async fn get_widget(&self, id: &ResourceIdentity) -> Result<Widget, ClientError> {
        let api: Api<Widget> = Api::namespaced(self.client.clone(), &id.namespace);
        api.get(&id.name).await.map_err(ClientError::from)
    }
}
