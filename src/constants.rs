// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Namespace holding the built-in add-on workloads
pub const SYSTEM_NAMESPACE: &str = "kube-system";

/// Container registry hosting the add-on images
pub mod registry {
    /// Repositories of the upstream aws-node images
    pub const AWS_NODE_REPOSITORIES: &[&str] = &["amazon-k8s-cni", "amazon-k8s-cni-init"];
    /// Registry domain for all partitions except China
    pub const DOMAIN: &str = "amazonaws.com";
    /// Registry domain for the China partition
    pub const DOMAIN_CN: &str = "amazonaws.com.cn";
    /// Account hosting the images when a region has no dedicated one
    pub const DEFAULT_ACCOUNT_ID: &str = "602401143452";
}

/// Control plane update polling configuration
pub mod update {
    /// Initial polling interval in seconds when waiting for an update
    pub const POLL_INTERVAL_SECS: u64 = 5;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 30;
}

/// Default timeout for API calls and waits
pub const DEFAULT_TIMEOUT: &str = "25m";

/// Field manager recorded on objects created or replaced by this tool
pub const FIELD_MANAGER: &str = "cluster-reconciler";
