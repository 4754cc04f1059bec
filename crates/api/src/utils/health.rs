//! Client health report
//!
//! Each component is probed once per report. The persisted stores are read
//! back and the public site's `/health` endpoint is called. A component is failing when its probe
//! returned an error.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Share of passing components at which the client counts as healthy.
pub const HEALTHY_SCORE: f64 = 0.8;

/// Probed parts of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    TokenStore,
    Cart,
    SearchHistory,
    PublicSite,
}

/// Outcome of one probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentHealth {
    pub component: Component,
    /// Probe error; `None` when the component passed.
    pub error: Option<String>,
}

impl ComponentHealth {
    /// Record the outcome of probing `component`.
    pub fn probe<T, E: Display>(component: Component, outcome: Result<T, E>) -> Self {
        Self { component, error: outcome.err().map(|err| err.to_string()) }
    }

    pub const fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Health of the whole client at `checked_at`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    /// Passing components over all components, 1.0 when nothing was probed
    pub score: f64,
    pub components: Vec<ComponentHealth>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_components(components: Vec<ComponentHealth>) -> Self {
        let passing = components.iter().filter(|c| c.is_healthy()).count();
        let score =
            if components.is_empty() { 1.0 } else { passing as f64 / components.len() as f64 };

        Self { healthy: score >= HEALTHY_SCORE, score, components, checked_at: Utc::now() }
    }

    /// Probe result for `component`, if it was probed.
    pub fn component(&self, component: Component) -> Option<&ComponentHealth> {
        self.components.iter().find(|c| c.component == component)
    }

    /// Components whose probe failed.
    pub fn failing(&self) -> impl Iterator<Item = &ComponentHealth> {
        self.components.iter().filter(|c| !c.is_healthy())
    }
}
