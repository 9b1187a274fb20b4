// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Idempotent create-or-replace of a single resource

use crate::constants::FIELD_MANAGER;
use crate::error::Result;
use crate::kubernetes::resource::ResourceHandle;
use crate::plan::{ApplyAction, PlanMode};
use kube::{api::PostParams, Client};
use tracing::{debug, instrument};

pub struct ResourceApplier {
    client: Client,
}

impl ResourceApplier {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create the resource if absent, otherwise replace it with the given spec.
    ///
    /// The lookup always runs; in plan mode the create/replace call is skipped
    /// and the action that would have been taken is returned.
    #[instrument(skip(self, resource), fields(resource = %resource.display_name()))]
    pub async fn create_or_replace(
        &self,
        resource: &ResourceHandle,
        plan: PlanMode,
    ) -> Result<ApplyAction> {
        let api = resource.api(self.client.clone());
        let pp = PostParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };

        match api.get_opt(resource.name()).await? {
            None => {
                debug!("{} not found", resource.display_name());
                if !plan.is_plan() {
                    api.create(&pp, &resource.object).await?;
                }
                Ok(ApplyAction::Created)
            }
            Some(existing) => {
                debug!(
                    "{} exists at resourceVersion {:?}",
                    resource.display_name(),
                    existing.metadata.resource_version
                );
                if !plan.is_plan() {
                    let mut desired = resource.object.clone();
                    desired.metadata.resource_version = existing.metadata.resource_version;
                    api.replace(resource.name(), &pp, &desired).await?;
                }
                Ok(ApplyAction::Replaced)
            }
        }
    }
}
