//! Custom Resource Definitions for the Widget operator
//!
//! This module contains the Widget CRD and its supporting types.

mod types;
mod widget;

pub use types::{Condition, ConditionStatus, WidgetPhase};
pub use widget::{Widget, WidgetSpec, WidgetStatus};
