//! Shared helpers for kind-cluster integration tests

use std::time::Duration;

use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, DeleteParams, ObjectMeta, PostParams};
use kube::Client;

use widget_operator::client::KubeResourceClient;
use widget_operator::crd::Widget;
use widget_operator::registrar::ensure_widget_crd;

/// Connect to the ambient cluster and make sure the Widget CRD is installed
pub async fn ensure_test_env() -> (Client, KubeResourceClient) {
    let client = Client::try_default()
        .await
        .expect("kubeconfig must point at a test cluster");
    let resources = KubeResourceClient::new(client.clone());

    ensure_widget_crd(&resources)
        .await
        .expect("widget CRD installs");
    wait_until_widgets_served(&client).await;

    (client, resources)
}

/// Wait until the freshly created CRD is actually servable
///
/// CRD creation returns before the API server starts serving the new type,
/// so the test harness imposes its own deadline here.
async fn wait_until_widgets_served(client: &Client) {
    let api: Api<Widget> = Api::all(client.clone());
    for _ in 0..20 {
        if api.list(&Default::default()).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    panic!("widgets.core.example.io never became servable");
}

/// Create a namespace if it does not already exist
pub async fn ensure_namespace(client: &Client, name: &str) {
    let api: Api<Namespace> = Api::all(client.clone());
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    match api.create(&PostParams::default(), &ns).await {
        Ok(_) => {}
        Err(kube::Error::Api(e)) if e.code == 409 => {}
        Err(e) => panic!("failed to create namespace {name}: {e}"),
    }
}

/// Delete a widget, ignoring failures from previous incomplete runs
pub async fn cleanup_widget(client: &Client, namespace: &str, name: &str) {
    let api: Api<Widget> = Api::namespaced(client.clone(), namespace);
    let _ = api.delete(name, &DeleteParams::default()).await;
}
