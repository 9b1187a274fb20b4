// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconcilers for endpoint access and built-in add-ons.

pub mod addon;
pub mod endpoint;

pub use addon::AddonReconciler;
pub use endpoint::EndpointAccessReconciler;
