//! Widget Custom Resource Definition
//!
//! A Widget is a managed resource provisioned on behalf of a member. The
//! spec carries the desired state supplied by the member; the status is
//! written by the control plane as provisioning progresses.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{Condition, WidgetPhase};

/// Specification for a Widget
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "core.example.io",
    version = "v1alpha1",
    kind = "Widget",
    plural = "widgets",
    shortname = "wg",
    status = "WidgetStatus",
    namespaced,
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Owner","type":"string","jsonPath":".spec.ownerId"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSpec {
    /// Identity of the member that owns this widget
    pub owner_id: String,

    /// Widget model to provision
    pub model: String,

    /// When true, reconciliation of this widget is suspended
    #[serde(default)]
    pub disabled: bool,
}

impl WidgetSpec {
    /// Validate the widget specification
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.owner_id.is_empty() {
            return Err(crate::Error::validation("widget owner must not be empty"));
        }
        if self.model.is_empty() {
            return Err(crate::Error::validation("widget model must not be empty"));
        }
        Ok(())
    }
}

/// Status for a Widget
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetStatus {
    /// Current phase of the widget lifecycle
    #[serde(default)]
    pub phase: WidgetPhase,

    /// Human-readable message about current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Conditions representing the widget state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl WidgetStatus {
    /// Create a new status with the given phase
    pub fn with_phase(phase: WidgetPhase) -> Self {
        Self {
            phase,
            ..Default::default()
        }
    }

    /// Set the phase and return self for chaining
    pub fn phase(mut self, phase: WidgetPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Set the message and return self for chaining
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Add a condition and return self for chaining
    pub fn condition(mut self, condition: Condition) -> Self {
        // Remove existing condition of the same type
        self.conditions.retain(|c| c.type_ != condition.type_);
        self.conditions.push(condition);
        self
    }
}
