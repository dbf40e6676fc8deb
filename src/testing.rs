//! Fluent state assertions for integration tests
//!
//! Test code verifies a Widget's remote state through an assertion chain:
//!
//! ```ignore
//! use widget_operator::client::ResourceIdentity;
//! use widget_operator::testing::{assert_that_widget, ExpectedCondition};
//! use widget_operator::crd::ConditionStatus;
//!
//! assert_that_widget(&client, ResourceIdentity::new("members", "alice"))
//!     .exists()
//!     .await
//!     .has_spec(&expected_spec)
//!     .await
//!     .has_conditions(&[ExpectedCondition::new("Ready", ConditionStatus::True)])
//!     .await;
//! ```
//!
//! The first predicate on a chain fetches the widget once; every later
//! predicate re-reads that cached outcome, so all assertions in one chain
//! observe a single consistent snapshot. Violated predicates record a
//! diagnostic and keep the chain running, letting one test report several
//! independent problems; all recorded diagnostics are raised together when
//! the finished chain is dropped.

use std::collections::BTreeMap;

use crate::client::{ClientError, ResourceClient, ResourceIdentity};
use crate::crd::{Condition, ConditionStatus, Widget, WidgetSpec};

/// Begin an assertion chain over the widget with the given identity
///
/// Nothing is fetched until the first predicate runs.
pub fn assert_that_widget(
    client: &dyn ResourceClient,
    identity: ResourceIdentity,
) -> WidgetAssertion<'_> {
    WidgetAssertion {
        client,
        identity,
        fetched: None,
        failures: Vec::new(),
    }
}

/// Assertion chain over one lazily-fetched Widget snapshot
///
/// Owned by a single test; not meant to be shared. Dropping the chain
/// panics with every recorded diagnostic, failing the enclosing test.
pub struct WidgetAssertion<'a> {
    client: &'a dyn ResourceClient,
    identity: ResourceIdentity,
    // Cached fetch outcome; populated by the first predicate and reused by
    // all later predicates on this chain.
    fetched: Option<Result<Widget, ClientError>>,
    failures: Vec<String>,
}

impl WidgetAssertion<'_> {
    /// Assert that the widget does not exist
    ///
    /// Passes only when the fetch outcome is a classified "not found"; a
    /// widget that exists, or any other fetch failure, records a diagnostic.
    pub async fn does_not_exist(mut self) -> Self {
        self.load().await;
        match &self.fetched {
            Some(Ok(_)) => {
                self.failures.push(format!(
                    "expected widget {} not to exist, but it was found",
                    self.identity
                ));
            }
            Some(Err(err)) if !err.is_not_found() => {
                self.failures.push(format!(
                    "expected widget {} not to exist, but fetching it failed with: {err}",
                    self.identity
                ));
            }
            _ => {}
        }
        self
    }

    /// Assert that the widget exists
    pub async fn exists(mut self) -> Self {
        self.load().await;
        if let Some(msg) = self.check_exists() {
            self.failures.push(msg);
        }
        self
    }

    /// Assert that the widget exists and its spec equals `expected`
    pub async fn has_spec(mut self, expected: &WidgetSpec) -> Self {
        self.load().await;
        if let Some(msg) = self.check_exists() {
            self.failures.push(msg);
            return self;
        }
        if let Some(Ok(widget)) = &self.fetched {
            if widget.spec != *expected {
                self.failures.push(format!(
                    "widget {} spec does not match:\n  expected: {:#?}\n  actual:   {:#?}",
                    self.identity, expected, widget.spec
                ));
            }
        }
        self
    }

    /// Assert that the widget exists and its conditions match `expected`
    ///
    /// Matching is exact-set by condition type: every expected condition
    /// must be present exactly once in the widget's status, and no actual
    /// condition may be missing from `expected`. Order is irrelevant and
    /// timestamps are never compared; see [`match_conditions`].
    pub async fn has_conditions(mut self, expected: &[ExpectedCondition]) -> Self {
        self.load().await;
        if let Some(msg) = self.check_exists() {
            self.failures.push(msg);
            return self;
        }
        if let Some(Ok(widget)) = &self.fetched {
            let actual = widget
                .status
                .as_ref()
                .map(|s| s.conditions.as_slice())
                .unwrap_or_default();
            for problem in match_conditions(actual, expected) {
                self.failures.push(format!("widget {}: {problem}", self.identity));
            }
        }
        self
    }

    /// Diagnostics recorded so far
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Consume the chain and return its diagnostics without panicking
    ///
    /// For code that inspects failures programmatically; ordinary tests
    /// just drop the chain and let it report.
    pub fn into_failures(mut self) -> Vec<String> {
        std::mem::take(&mut self.failures)
    }

    // Fetch the widget on first use; later predicates reuse the cached
    // outcome so the whole chain observes one snapshot.
    async fn load(&mut self) {
        if self.fetched.is_none() {
            self.fetched = Some(self.client.get_widget(&self.identity).await);
        }
    }

    fn check_exists(&self) -> Option<String> {
        match &self.fetched {
            Some(Err(err)) if err.is_not_found() => Some(format!(
                "expected widget {} to exist, but it was not found",
                self.identity
            )),
            Some(Err(err)) => Some(format!(
                "expected widget {} to exist, but fetching it failed: {err}",
                self.identity
            )),
            _ => None,
        }
    }
}

impl Drop for WidgetAssertion<'_> {
    fn drop(&mut self) {
        if self.failures.is_empty() || std::thread::panicking() {
            return;
        }
        panic!(
            "widget assertion failed for {}:\n- {}",
            self.identity,
            self.failures.join("\n- ")
        );
    }
}

/// One condition a widget's status is expected to report
///
/// The type label selects the actual condition to compare against; `status`
/// is always compared, while `reason` and `message` are compared only when
/// explicitly supplied. Timestamps are not expressible here and therefore
/// never participate in matching.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpectedCondition {
    /// Type label of the condition (e.g., Ready)
    pub type_: String,
    /// Expected status value
    pub status: ConditionStatus,
    /// Expected reason, if it should be compared
    pub reason: Option<String>,
    /// Expected message, if it should be compared
    pub message: Option<String>,
}

impl ExpectedCondition {
    /// Expect a condition of the given type with the given status
    pub fn new(type_: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            type_: type_.into(),
            status,
            reason: None,
            message: None,
        }
    }

    /// Also require the condition's reason to equal `reason`
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Also require the condition's message to equal `message`
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Match a widget's conditions against an expected set, returning problems
///
/// The match is exact-set, not subset: the type labels of `actual` and
/// `expected` must coincide, each appearing exactly once per side. For each
/// matched pair the status must be equal, and reason/message must be equal
/// where the expected condition supplies them. Returns one human-readable
/// problem per violation; an empty result means the conditions match.
pub fn match_conditions(actual: &[Condition], expected: &[ExpectedCondition]) -> Vec<String> {
    let mut problems = Vec::new();

    let mut actual_by_type: BTreeMap<&str, &Condition> = BTreeMap::new();
    for condition in actual {
        if actual_by_type.insert(condition.type_.as_str(), condition).is_some() {
            problems.push(format!(
                "condition type {:?} appears more than once in status",
                condition.type_
            ));
        }
    }

    let mut expected_by_type: BTreeMap<&str, &ExpectedCondition> = BTreeMap::new();
    for condition in expected {
        if expected_by_type.insert(condition.type_.as_str(), condition).is_some() {
            problems.push(format!(
                "condition type {:?} appears more than once in the expected set",
                condition.type_
            ));
        }
    }

    for (type_, expected) in &expected_by_type {
        let Some(actual) = actual_by_type.get(type_) else {
            problems.push(format!(
                "missing condition {type_:?} (expected status {})",
                expected.status
            ));
            continue;
        };
        if actual.status != expected.status {
            problems.push(format!(
                "condition {type_:?} has status {}, expected {}",
                actual.status, expected.status
            ));
        }
        if let Some(reason) = &expected.reason {
            if actual.reason != *reason {
                problems.push(format!(
                    "condition {type_:?} has reason {:?}, expected {reason:?}",
                    actual.reason
                ));
            }
        }
        if let Some(message) = &expected.message {
            if actual.message != *message {
                problems.push(format!(
                    "condition {type_:?} has message {:?}, expected {message:?}",
                    actual.message
                ));
            }
        }
    }

    for type_ in actual_by_type.keys() {
        if !expected_by_type.contains_key(type_) {
            problems.push(format!("unexpected condition {type_:?} in status"));
        }
    }

    problems
}
