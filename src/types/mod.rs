// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by the reconcilers.

pub mod endpoint;
pub mod manifest;

pub use endpoint::{AccessWarning, EndpointAccess, EndpointAccessOverrides};
pub use manifest::{AddonManifest, ResourceItem, ResourceKind};
