// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Built-in add-ons: their manifests and per-resource transforms.

pub mod transform;

use crate::constants::SYSTEM_NAMESPACE;
use crate::error::{ReconcileError, Result};
use crate::kubernetes::resource::{Capabilities, ResourceHandle};
use crate::types::manifest::{AddonManifest, ResourceItem, ResourceKind};

/// Name of the VPC CNI add-on
pub const AWS_NODE: &str = "aws-node";

/// A built-in add-on and the facts needed to reconcile it.
///
/// The primary workload is the DaemonSet named after the add-on.
#[derive(Debug)]
pub struct Addon {
    pub name: &'static str,
    /// Namespace of the primary workload and default for namespaced items
    pub namespace: &'static str,
    /// CRDs the manifest only partially defines; skipped in plan mode
    pub partially_defined_crds: &'static [&'static str],
    manifest: &'static str,
}

impl Addon {
    /// Look up a built-in add-on by name
    pub fn find(name: &str) -> Result<Addon> {
        match name {
            AWS_NODE => Ok(Addon {
                name: AWS_NODE,
                namespace: SYSTEM_NAMESPACE,
                partially_defined_crds: &["eniconfigs.crd.k8s.amazonaws.com"],
                manifest: include_str!("../../assets/aws-node.yaml"),
            }),
            other => Err(ReconcileError::ManifestError(format!(
                "no built-in add-on named {:?}",
                other
            ))),
        }
    }

    /// Parse the embedded manifest
    pub fn load_manifest(&self) -> Result<AddonManifest> {
        AddonManifest::parse(self.name, self.manifest)
    }

    /// Capabilities of a manifest item within this add-on
    pub fn capabilities(&self, item: &ResourceItem) -> Capabilities {
        let is_primary = item.kind == ResourceKind::DaemonSet && item.name() == Some(self.name);
        let partially_defined = item.kind == ResourceKind::CustomResourceDefinition
            && item
                .name()
                .is_some_and(|n| self.partially_defined_crds.contains(&n));

        Capabilities {
            needs_image_transform: is_primary,
            skippable_in_plan_mode: partially_defined,
        }
    }

    /// Build the handle for an item, applying the transforms its kind needs
    pub fn resource_handle(&self, item: ResourceItem, region: &str) -> Result<ResourceHandle> {
        let capabilities = self.capabilities(&item);
        let mut handle = ResourceHandle::new(item, capabilities, self.namespace)?;

        if capabilities.needs_image_transform {
            transform::rewrite_workload_images(&mut handle.object, region, self.name)?;
        }

        Ok(handle)
    }
}
