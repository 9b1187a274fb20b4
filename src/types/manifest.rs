// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{ReconcileError, Result};
use kube::api::DynamicObject;
use serde::Deserialize;

/// Kinds that get special treatment during add-on reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    DaemonSet,
    CustomResourceDefinition,
    Other(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::CustomResourceDefinition => "CustomResourceDefinition",
            ResourceKind::Other(kind) => kind,
        }
    }

    /// Whether objects of this kind live outside any namespace
    pub fn is_cluster_scoped(&self) -> bool {
        matches!(
            self.as_str(),
            "CustomResourceDefinition"
                | "ClusterRole"
                | "ClusterRoleBinding"
                | "Namespace"
                | "PriorityClass"
                | "StorageClass"
                | "MutatingWebhookConfiguration"
                | "ValidatingWebhookConfiguration"
        )
    }
}

impl From<&str> for ResourceKind {
    fn from(kind: &str) -> Self {
        match kind {
            "DaemonSet" => ResourceKind::DaemonSet,
            "CustomResourceDefinition" => ResourceKind::CustomResourceDefinition,
            other => ResourceKind::Other(other.to_string()),
        }
    }
}

/// One object of an add-on manifest
#[derive(Debug, Clone)]
pub struct ResourceItem {
    pub kind: ResourceKind,
    pub object: DynamicObject,
}

impl ResourceItem {
    pub fn name(&self) -> Option<&str> {
        self.object.metadata.name.as_deref()
    }
}

/// Ordered set of objects making up an add-on; order is kept as written
#[derive(Debug, Clone)]
pub struct AddonManifest {
    pub name: String,
    pub items: Vec<ResourceItem>,
}

impl AddonManifest {
    /// Parse a multi-document YAML manifest
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        let mut items = Vec::new();

        for (index, document) in serde_yaml::Deserializer::from_str(raw).enumerate() {
            let value = serde_yaml::Value::deserialize(document).map_err(|e| {
                ReconcileError::ManifestError(format!("{} document {}: {}", name, index, e))
            })?;
            if value.is_null() {
                continue;
            }

            let object: DynamicObject = serde_yaml::from_value(value).map_err(|e| {
                ReconcileError::ManifestError(format!("{} document {}: {}", name, index, e))
            })?;
            let kind = object
                .types
                .as_ref()
                .map(|t| ResourceKind::from(t.kind.as_str()))
                .ok_or_else(|| {
                    ReconcileError::ManifestError(format!(
                        "{} document {}: missing apiVersion or kind",
                        name, index
                    ))
                })?;

            items.push(ResourceItem { kind, object });
        }

        Ok(AddonManifest {
            name: name.to_string(),
            items,
        })
    }
}
