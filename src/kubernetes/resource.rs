// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource handles: a manifest object resolved to an API endpoint, plus the
//! capabilities decided for its kind.

use crate::error::{ReconcileError, Result};
use crate::types::manifest::{ResourceItem, ResourceKind};
use kube::{
    api::{Api, DynamicObject},
    core::{GroupVersionKind, TypeMeta},
    discovery::ApiResource,
    Client,
};

/// Per-kind behaviour, decided once when the handle is built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Container images get rewritten to the regional registry
    pub needs_image_transform: bool,
    /// Left out of plan runs because the manifest only partially defines it
    pub skippable_in_plan_mode: bool,
}

/// A manifest object ready for create-or-replace
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    pub kind: ResourceKind,
    pub object: DynamicObject,
    pub api_resource: ApiResource,
    pub capabilities: Capabilities,
    name: String,
}

impl ResourceHandle {
    /// Build a handle; namespaced objects without a namespace get `default_namespace`
    pub fn new(
        item: ResourceItem,
        capabilities: Capabilities,
        default_namespace: &str,
    ) -> Result<Self> {
        let ResourceItem { kind, mut object } = item;

        let type_meta = object.types.as_ref().ok_or_else(|| {
            ReconcileError::InvalidResource(format!(
                "{} is missing apiVersion or kind",
                kind.as_str()
            ))
        })?;
        let api_resource = ApiResource::from_gvk(&gvk_from_type_meta(type_meta));

        let name = object.metadata.name.clone().ok_or_else(|| {
            ReconcileError::InvalidResource(format!("{} is missing metadata.name", kind.as_str()))
        })?;

        if kind.is_cluster_scoped() {
            object.metadata.namespace = None;
        } else if object.metadata.namespace.is_none() {
            object.metadata.namespace = Some(default_namespace.to_string());
        }

        Ok(Self {
            kind,
            object,
            api_resource,
            capabilities,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.object.metadata.namespace.as_deref()
    }

    /// Identity used in log lines: kind/namespace/name
    pub fn display_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}/{}", self.kind.as_str(), ns, self.name),
            None => format!("{}/{}", self.kind.as_str(), self.name),
        }
    }

    /// API for this object's kind, scoped to its namespace when it has one
    pub fn api(&self, client: Client) -> Api<DynamicObject> {
        match self.namespace() {
            Some(ns) => Api::namespaced_with(client, ns, &self.api_resource),
            None => Api::all_with(client, &self.api_resource),
        }
    }
}

fn gvk_from_type_meta(tm: &TypeMeta) -> GroupVersionKind {
    let (group, version) = match tm.api_version.rsplit_once('/') {
        Some((g, v)) => (g.to_string(), v.to_string()),
        None => (String::new(), tm.api_version.clone()),
    };

    GroupVersionKind {
        group,
        version,
        kind: tm.kind.clone(),
    }
}
