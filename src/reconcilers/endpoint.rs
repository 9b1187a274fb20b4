// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Endpoint access reconciler - brings the API server endpoint access of a
//! cluster in line with the requested overrides.

use crate::cloud::ControlPlane;
use crate::error::Result;
use crate::plan::{
    log_completed_action, log_intended_action, log_plan_mode_warning, PlanMode, ReconcileOutcome,
};
use crate::types::endpoint::{EndpointAccess, EndpointAccessOverrides};
use tracing::{info, instrument, warn};

pub struct EndpointAccessReconciler<C> {
    control_plane: C,
}

impl<C: ControlPlane> EndpointAccessReconciler<C> {
    pub fn new(control_plane: C) -> Self {
        Self { control_plane }
    }

    /// Load the current access of `cluster` and reconcile it against `overrides`
    #[instrument(skip(self))]
    pub async fn run(
        &self,
        cluster: &str,
        region: &str,
        overrides: EndpointAccessOverrides,
        plan: PlanMode,
    ) -> Result<ReconcileOutcome> {
        let current = self.control_plane.describe_endpoint_access(cluster).await?;
        info!("current Kubernetes API endpoint access: {}", current);

        let outcome = self
            .reconcile(cluster, region, current, overrides, plan)
            .await?;
        if outcome.changed {
            log_plan_mode_warning(plan);
        }
        Ok(outcome)
    }

    /// Reconcile a known current state against the overrides.
    ///
    /// Only the final update call mutates; validation failures return before it
    /// in both modes.
    pub async fn reconcile(
        &self,
        cluster: &str,
        region: &str,
        current: EndpointAccess,
        overrides: EndpointAccessOverrides,
        plan: PlanMode,
    ) -> Result<ReconcileOutcome> {
        let desired = current.merge(&overrides);

        if desired == current {
            info!(
                "Kubernetes API endpoint access for cluster {:?} in {:?} is already up to date",
                cluster, region
            );
            return Ok(ReconcileOutcome::unchanged());
        }

        log_intended_action(
            plan,
            &format!(
                "update Kubernetes API endpoint access for cluster {:?} in {:?} to: {}",
                cluster, region, desired
            ),
        );

        let mut outcome = ReconcileOutcome::changed();
        if let Some(warning) = desired.validate()? {
            warn!("{}", warning);
            outcome = outcome.with_warning(warning);
        }

        if plan.is_plan() {
            return Ok(outcome);
        }

        self.control_plane
            .update_endpoint_access(cluster, desired)
            .await?;
        log_completed_action(
            plan,
            &format!(
                "the Kubernetes API endpoint access for cluster {:?} in {:?} has been updated to: {}",
                cluster, region, desired
            ),
        );

        Ok(outcome)
    }
}
