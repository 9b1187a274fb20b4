// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation and kubeconfig utilities

use crate::error::{ReconcileError, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Create a Kubernetes client, from an explicit kubeconfig file if given,
/// otherwise from the environment. `timeout` bounds every API call.
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>, timeout: Duration) -> Result<Client> {
    let mut config = match kubeconfig {
        Some(path) => config_from_kubeconfig(path).await?,
        None => KConfig::infer()
            .await
            .map_err(|e| ReconcileError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
    };

    debug!(
        "Using cluster {} with a {:?} timeout",
        config.cluster_url, timeout
    );
    config.connect_timeout = Some(timeout);
    config.read_timeout = Some(timeout);
    config.write_timeout = Some(timeout);

    Client::try_from(config)
        .map_err(|e| ReconcileError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Build a client config from a kubeconfig file
async fn config_from_kubeconfig(path: &Path) -> Result<KConfig> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        ReconcileError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| ReconcileError::KubeconfigError(format!("Failed to create config: {}", e)))
}
