// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Plan (dry-run) contract shared by the reconcilers.
//!
//! Every operation that can mutate remote state takes a [`PlanMode`] and must
//! reach the same verdict in both modes; only the mutating call is skipped.

use std::fmt;
use tracing::{info, warn};

/// Whether mutating calls are simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    Plan,
    Apply,
}

impl PlanMode {
    /// Mutations only run once the caller approved them
    pub fn from_approve(approve: bool) -> Self {
        if approve {
            PlanMode::Apply
        } else {
            PlanMode::Plan
        }
    }

    pub fn is_plan(self) -> bool {
        self == PlanMode::Plan
    }
}

/// Result of a reconcile call; in plan mode `changed` means "would change"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub changed: bool,
    pub warnings: Vec<String>,
}

impl ReconcileOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl fmt::Display) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}

/// Action taken (or that would be taken) on a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAction {
    Created,
    Replaced,
    Skipped,
}

impl ApplyAction {
    pub fn verb(self) -> &'static str {
        match self {
            ApplyAction::Created => "created",
            ApplyAction::Replaced => "replaced",
            ApplyAction::Skipped => "skipped",
        }
    }

    /// Status line for a resource, phrased for the given mode
    pub fn describe(self, plan: PlanMode, resource: &str) -> String {
        if plan.is_plan() {
            format!("(plan) would have {} {}", self.verb(), resource)
        } else {
            format!("{} {}", self.verb(), resource)
        }
    }
}

/// Log what is about to happen
pub fn log_intended_action(plan: PlanMode, message: &str) {
    if plan.is_plan() {
        info!("(plan) would {}", message);
    } else {
        info!("will {}", message);
    }
}

/// Log what has been done
pub fn log_completed_action(plan: PlanMode, message: &str) {
    if plan.is_plan() {
        info!("(plan) would have {}", message);
    } else {
        info!("{}", message);
    }
}

/// Remind the caller that nothing was applied
pub fn log_plan_mode_warning(plan: PlanMode) {
    if plan.is_plan() {
        warn!("no changes were applied, run again with '--approve' to apply the changes");
    }
}
