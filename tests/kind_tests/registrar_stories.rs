//! Integration tests for Widget CRD registration
//!
//! These tests exercise the registrar against a real API server, where the
//! "already exists" rejection comes from actual optimistic concurrency in
//! etcd rather than from a mock.

use kube::api::Api;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use widget_operator::registrar::ensure_widget_crd;

use super::helpers::ensure_test_env;

/// Story: Operator restarts keep re-installing the CRD without error
///
/// The first invocation creates `widgets.core.example.io`; every later
/// invocation is rejected by the API server as already existing and must
/// still report success. This is what lets any number of operator replicas
/// start in any order.
#[tokio::test]
#[ignore = "requires kind cluster - run with: cargo test --test kind -- --ignored"]
async fn story_repeated_crd_registration_succeeds() {
    let (_, resources) = ensure_test_env().await;

    // ensure_test_env already installed the CRD once, so each of these
    // runs the already-exists path against the real API server.
    for _ in 0..3 {
        ensure_widget_crd(&resources)
            .await
            .expect("repeated registration must succeed");
    }
}

/// Story: The installed definition matches the embedded manifest
#[tokio::test]
#[ignore = "requires kind cluster - run with: cargo test --test kind -- --ignored"]
async fn story_installed_crd_has_expected_identity() {
    let (client, _) = ensure_test_env().await;

    let crds: Api<CustomResourceDefinition> = Api::all(client);
    let crd = crds
        .get("widgets.core.example.io")
        .await
        .expect("widget CRD must exist after registration");

    assert_eq!(crd.spec.group, "core.example.io");
    assert_eq!(crd.spec.names.kind, "Widget");
    assert_eq!(crd.spec.names.plural, "widgets");
    assert_eq!(crd.spec.scope, "Namespaced");
}
