// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster control-plane API used by the endpoint access reconciler.

pub mod eks;

pub use eks::EksControlPlane;

use crate::error::Result;
use crate::types::endpoint::EndpointAccess;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Reads and updates the endpoint access of a managed cluster
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Current endpoint access; fails if the cluster cannot be updated right now
    async fn describe_endpoint_access(&self, cluster: &str) -> Result<EndpointAccess>;

    /// Replace the endpoint access as a whole and wait for the change to land
    async fn update_endpoint_access(&self, cluster: &str, access: EndpointAccess) -> Result<()>;
}
