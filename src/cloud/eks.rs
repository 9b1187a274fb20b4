// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! EKS implementation of the control-plane API

use crate::cloud::ControlPlane;
use crate::constants::update::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::{ReconcileError, Result};
use crate::types::endpoint::EndpointAccess;
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_eks::config::Region;
use aws_sdk_eks::error::DisplayErrorContext;
use aws_sdk_eks::types::{Cluster, ClusterStatus, Update, UpdateStatus, VpcConfigRequest};
use aws_sdk_eks::Client;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument};

pub struct EksControlPlane {
    client: Client,
    timeout: Duration,
}

impl EksControlPlane {
    /// Build a client from the default credential chain for `region`
    pub async fn new(region: &str, wait_timeout: Duration) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(wait_timeout)
                    .build(),
            )
            .load()
            .await;

        Self {
            client: Client::new(&config),
            timeout: wait_timeout,
        }
    }

    /// Poll an update until it completes, with exponential backoff
    async fn wait_for_update(&self, cluster: &str, update_id: &str) -> Result<()> {
        let mut interval = POLL_INTERVAL_SECS;

        loop {
            let output = self
                .client
                .describe_update()
                .name(cluster)
                .update_id(update_id)
                .send()
                .await
                .map_err(|e| {
                    ReconcileError::ControlPlaneError(format!(
                        "describing update {} of cluster {}: {}",
                        update_id,
                        cluster,
                        DisplayErrorContext(&e)
                    ))
                })?;

            let Some(update) = output.update() else {
                return Err(ReconcileError::ControlPlaneError(format!(
                    "update {} of cluster {} not found",
                    update_id, cluster
                )));
            };
            if let Some(result) = update_result(cluster, update) {
                return result;
            }
            debug!(
                "Update {} is {:?}, checking again in {} seconds...",
                update_id,
                update.status(),
                interval
            );

            sleep(Duration::from_secs(interval)).await;

            // Exponential backoff with max cap
            interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
        }
    }
}

#[async_trait]
impl ControlPlane for EksControlPlane {
    #[instrument(skip(self))]
    async fn describe_endpoint_access(&self, cluster: &str) -> Result<EndpointAccess> {
        let output = self
            .client
            .describe_cluster()
            .name(cluster)
            .send()
            .await
            .map_err(|e| {
                ReconcileError::ControlPlaneError(format!(
                    "describing cluster {}: {}",
                    cluster,
                    DisplayErrorContext(&e)
                ))
            })?;

        let Some(description) = output.cluster() else {
            return Err(ReconcileError::ControlPlaneError(format!(
                "cluster {} not found",
                cluster
            )));
        };

        endpoint_access(cluster, description)
    }

    #[instrument(skip(self))]
    async fn update_endpoint_access(&self, cluster: &str, access: EndpointAccess) -> Result<()> {
        let vpc_config = VpcConfigRequest::builder()
            .endpoint_private_access(access.private_access)
            .endpoint_public_access(access.public_access)
            .build();

        let output = self
            .client
            .update_cluster_config()
            .name(cluster)
            .resources_vpc_config(vpc_config)
            .send()
            .await
            .map_err(|e| {
                ReconcileError::ControlPlaneError(format!(
                    "updating endpoint access of cluster {}: {}",
                    cluster,
                    DisplayErrorContext(&e)
                ))
            })?;

        let Some(update_id) = output.update().and_then(|u| u.id()) else {
            return Err(ReconcileError::ControlPlaneError(format!(
                "update of cluster {} returned no update id",
                cluster
            )));
        };

        info!("Waiting for update {} of cluster {} to complete", update_id, cluster);
        timeout(self.timeout, self.wait_for_update(cluster, update_id))
            .await
            .map_err(|_| {
                ReconcileError::Timeout(format!(
                    "waiting {:?} for update {} of cluster {}",
                    self.timeout, update_id, cluster
                ))
            })?
    }
}

/// Endpoint access of a described cluster, which must be `ACTIVE`
fn endpoint_access(name: &str, cluster: &Cluster) -> Result<EndpointAccess> {
    match cluster.status() {
        Some(ClusterStatus::Active) => {}
        status => {
            return Err(ReconcileError::ClusterNotReady(format!(
                "cluster {} is {:?}, it must be ACTIVE to be updated",
                name, status
            )))
        }
    }

    let Some(vpc) = cluster.resources_vpc_config() else {
        return Err(ReconcileError::ControlPlaneError(format!(
            "cluster {} has no VPC configuration",
            name
        )));
    };

    Ok(EndpointAccess::new(
        vpc.endpoint_private_access(),
        vpc.endpoint_public_access(),
    ))
}

/// Final result of an update, or `None` while it is still in progress
fn update_result(cluster: &str, update: &Update) -> Option<Result<()>> {
    match update.status() {
        Some(UpdateStatus::Successful) => Some(Ok(())),
        Some(UpdateStatus::Failed) | Some(UpdateStatus::Cancelled) => {
            let reasons: Vec<&str> = update
                .errors()
                .iter()
                .filter_map(|e| e.error_message())
                .collect();
            Some(Err(ReconcileError::ControlPlaneError(format!(
                "update {} of cluster {} did not succeed: {}",
                update.id().unwrap_or_default(),
                cluster,
                reasons.join("; ")
            ))))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_eks::types::{ErrorDetail, VpcConfigResponse};

    fn cluster(status: ClusterStatus, private: bool, public: bool) -> Cluster {
        Cluster::builder()
            .name("test-cluster")
            .status(status)
            .resources_vpc_config(
                VpcConfigResponse::builder()
                    .endpoint_private_access(private)
                    .endpoint_public_access(public)
                    .build(),
            )
            .build()
    }

    fn update(status: UpdateStatus) -> Update {
        Update::builder().id("update-1").status(status).build()
    }

    #[test]
    fn test_active_cluster_reports_endpoint_access() {
        let access =
            endpoint_access("test-cluster", &cluster(ClusterStatus::Active, true, false)).unwrap();

        assert_eq!(access, EndpointAccess::new(true, false));
    }

    #[test]
    fn test_inactive_cluster_is_not_ready() {
        for status in [
            ClusterStatus::Creating,
            ClusterStatus::Updating,
            ClusterStatus::Deleting,
            ClusterStatus::Failed,
        ] {
            let err = endpoint_access("test-cluster", &cluster(status, false, true)).unwrap_err();
            assert!(matches!(err, ReconcileError::ClusterNotReady(_)));
        }
    }

    #[test]
    fn test_cluster_without_status_is_not_ready() {
        let described = Cluster::builder().name("test-cluster").build();

        let err = endpoint_access("test-cluster", &described).unwrap_err();
        assert!(matches!(err, ReconcileError::ClusterNotReady(_)));
    }

    #[test]
    fn test_cluster_without_vpc_config_is_an_error() {
        let described = Cluster::builder()
            .name("test-cluster")
            .status(ClusterStatus::Active)
            .build();

        let err = endpoint_access("test-cluster", &described).unwrap_err();
        assert!(matches!(err, ReconcileError::ControlPlaneError(_)));
    }

    #[test]
    fn test_successful_update_ends_the_wait() {
        assert!(matches!(
            update_result("test-cluster", &update(UpdateStatus::Successful)),
            Some(Ok(()))
        ));
    }

    #[test]
    fn test_in_progress_update_keeps_waiting() {
        assert!(update_result("test-cluster", &update(UpdateStatus::InProgress)).is_none());
        assert!(update_result("test-cluster", &Update::builder().build()).is_none());
    }

    #[test]
    fn test_failed_or_cancelled_update_is_an_error() {
        for status in [UpdateStatus::Failed, UpdateStatus::Cancelled] {
            let failed = Update::builder()
                .id("update-1")
                .status(status)
                .errors(
                    ErrorDetail::builder()
                        .error_message("subnet is full")
                        .build(),
                )
                .build();

            let err = update_result("test-cluster", &failed).unwrap().unwrap_err();
            assert!(matches!(err, ReconcileError::ControlPlaneError(_)));
            assert!(err.to_string().contains("subnet is full"));
        }
    }
}
