//! Idempotent installation of the Widget CRD
//!
//! The operator installs the Widget CustomResourceDefinition on startup
//! from a manifest embedded at build time. Installation must tolerate the
//! CRD already being present: operators restart, and several replicas may
//! race to install the same definition. An "already exists" rejection from
//! the API server is therefore collapsed into success; every other failure
//! is surfaced to the caller, which decides whether startup can proceed.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use tracing::{debug, info};

use crate::client::{ClientError, ResourceClient};
use crate::Error;

/// Kind name used for registrar log and error context
const WIDGET_KIND: &str = "Widget";

/// Ensure the Widget CRD exists in the cluster
///
/// Decodes the embedded manifest and submits it for creation. If creation
/// is rejected because the definition already exists, the call succeeds;
/// any other rejection is returned as an error naming the definition.
///
/// Exactly one create attempt is made: no retries, and no waiting for the
/// new type to become servable.
pub async fn ensure_widget_crd<C: ResourceClient + ?Sized>(client: &C) -> Result<(), Error> {
    install_crd(client, WIDGET_KIND, WIDGET_CRD_MANIFEST).await
}

/// Decode a CRD manifest and create it, treating "already exists" as success
async fn install_crd<C: ResourceClient + ?Sized>(
    client: &C,
    kind: &str,
    manifest: &str,
) -> Result<(), Error> {
    let crd: CustomResourceDefinition =
        serde_yaml::from_str(manifest).map_err(|source| Error::CrdDecode {
            name: kind.to_string(),
            source,
        })?;

    match client.create_crd(&crd).await {
        Ok(()) => {
            info!(kind, "CRD created");
            Ok(())
        }
        Err(ClientError::AlreadyExists) => {
            debug!(kind, "CRD already present, nothing to do");
            Ok(())
        }
        Err(source) => Err(Error::CrdCreate {
            name: kind.to_string(),
            source,
        }),
    }
}

const WIDGET_CRD_MANIFEST: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: widgets.core.example.io
spec:
  group: core.example.io
  names:
    kind: Widget
    listKind: WidgetList
    plural: widgets
    singular: widget
    shortNames:
      - wg
  scope: Namespaced
  versions:
    - name: v1alpha1
      served: true
      storage: true
      subresources:
        status: {}
      additionalPrinterColumns:
        - name: ready
          type: string
          jsonPath: .status.conditions[?(@.type=='Ready')].status
        - name: age
          type: date
          jsonPath: .metadata.creationTimestamp
      schema:
        openAPIV3Schema:
          type: object
          properties:
            spec:
              description: Desired state of the widget, supplied by its owner.
              type: object
              properties:
                ownerId:
                  description: Identity of the member that owns this widget.
                  type: string
                model:
                  description: Widget model to provision.
                  type: string
                disabled:
                  description: When true, reconciliation of this widget is suspended.
                  type: boolean
              required:
                - ownerId
                - model
            status:
              description: Observed state of the widget, written by the control plane.
              type: object
              properties:
                phase:
                  description: Current phase of the widget lifecycle.
                  type: string
                message:
                  description: Human readable message about the current state.
                  type: string
                conditions:
                  description: Conditions is an array of current widget conditions.
                  type: array
                  items:
                    type: object
                    properties:
                      type:
                        description: Type of widget condition, for example Ready.
                        type: string
                      status:
                        description: Status of the condition, one of True, False, Unknown.
                        type: string
                      reason:
                        description: Brief reason for the condition's last transition.
                        type: string
                      message:
                        description: Human readable message about the last transition.
                        type: string
                      lastProbeTime:
                        description: Last time the condition was checked.
                        format: date-time
                        type: string
                      lastTransitionTime:
                        description: Last time the condition transitioned between statuses.
                        format: date-time
                        type: string
                    required:
                      - type
                      - status
"#;
