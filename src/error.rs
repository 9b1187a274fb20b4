// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Control plane API error: {0}")]
    ControlPlaneError(String),

    #[error("Either public access or private access must be enabled.")]
    NoEndpointAccess,

    #[error("unexpected image format {image:?} for {addon:?}")]
    ImageFormat { image: String, addon: String },

    #[error("Failed to load manifest: {0}")]
    ManifestError(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Cluster not ready: {0}")]
    ClusterNotReady(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
