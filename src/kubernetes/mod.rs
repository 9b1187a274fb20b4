// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, resource handles and create-or-replace.

pub mod apply;
pub mod client;
pub mod resource;

pub use apply::ResourceApplier;
pub use client::create_client;
pub use resource::{Capabilities, ResourceHandle};
