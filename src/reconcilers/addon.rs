// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Add-on reconciler - refreshes the objects of a built-in add-on that is
//! already installed in the cluster.

use crate::addons::Addon;
use crate::error::Result;
use crate::kubernetes::apply::ResourceApplier;
use crate::plan::{log_plan_mode_warning, ApplyAction, PlanMode, ReconcileOutcome};
use k8s_openapi::api::apps::v1::DaemonSet;
use kube::{Api, Client};
use tracing::{error, info, instrument, warn};

pub struct AddonReconciler {
    client: Client,
}

impl AddonReconciler {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Update the add-on named `addon_name` if its primary workload exists.
    ///
    /// Items are applied in manifest order and the first failure aborts the
    /// rest. A plan run reports the add-on as out of date.
    #[instrument(skip(self))]
    pub async fn update_addon(
        &self,
        addon_name: &str,
        region: &str,
        plan: PlanMode,
    ) -> Result<ReconcileOutcome> {
        let addon = Addon::find(addon_name)?;

        if !self.is_installed(&addon).await? {
            warn!("{:?} was not found", addon.name);
            return Ok(ReconcileOutcome::unchanged());
        }

        let manifest = addon.load_manifest()?;
        let applier = ResourceApplier::new(self.client.clone());

        for item in manifest.items {
            let resource = addon.resource_handle(item, region)?;

            if resource.capabilities.skippable_in_plan_mode && plan.is_plan() {
                // The manifest only partially defines this CRD, a plan run
                // cannot tell whether it drifted
                info!(
                    "{}",
                    ApplyAction::Skipped.describe(plan, &resource.display_name())
                );
                continue;
            }

            let action = applier
                .create_or_replace(&resource, plan)
                .await
                .inspect_err(|e| {
                    error!(
                        "{:?} update is incomplete, failed at {}: {}",
                        addon.name,
                        resource.display_name(),
                        e
                    )
                })?;
            info!("{}", action.describe(plan, &resource.display_name()));
        }

        if plan.is_plan() {
            warn!("(plan) {:?} is not up-to-date", addon.name);
            log_plan_mode_warning(plan);
            return Ok(ReconcileOutcome::changed());
        }

        info!("{:?} is now up-to-date", addon.name);
        Ok(ReconcileOutcome::unchanged())
    }

    /// Probe for the add-on's primary workload in its namespace
    async fn is_installed(&self, addon: &Addon) -> Result<bool> {
        let daemonsets: Api<DaemonSet> = Api::namespaced(self.client.clone(), addon.namespace);
        Ok(daemonsets.get_opt(addon.name).await?.is_some())
    }
}
