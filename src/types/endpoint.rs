// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{ReconcileError, Result};
use std::fmt;

/// Reachability of the cluster API server endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointAccess {
    pub private_access: bool,
    pub public_access: bool,
}

/// Caller-supplied access values; `None` means the caller did not set the flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndpointAccessOverrides {
    pub private_access: Option<bool>,
    pub public_access: Option<bool>,
}

/// Non-fatal finding of endpoint access validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessWarning {
    /// Only reachable from inside the VPC
    PrivateOnly,
}

impl fmt::Display for AccessWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessWarning::PrivateOnly => write!(
                f,
                "public access is disabled: subsequent commands and Kubernetes API calls \
                 must be run from within the VPC, see \
                 https://docs.aws.amazon.com/eks/latest/userguide/cluster-endpoint.html"
            ),
        }
    }
}

impl fmt::Display for EndpointAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "privateAccess={}, publicAccess={}",
            self.private_access, self.public_access
        )
    }
}

impl EndpointAccess {
    pub fn new(private_access: bool, public_access: bool) -> Self {
        Self {
            private_access,
            public_access,
        }
    }

    /// Apply overrides on top of this state; unset overrides keep the current value
    pub fn merge(&self, overrides: &EndpointAccessOverrides) -> Self {
        Self {
            private_access: overrides.private_access.unwrap_or(self.private_access),
            public_access: overrides.public_access.unwrap_or(self.public_access),
        }
    }

    /// Reject a state that leaves the API server unreachable.
    ///
    /// Private-only access is legal but reported as a warning.
    pub fn validate(&self) -> Result<Option<AccessWarning>> {
        match (self.private_access, self.public_access) {
            (false, false) => Err(ReconcileError::NoEndpointAccess),
            (true, false) => Ok(Some(AccessWarning::PrivateOnly)),
            _ => Ok(None),
        }
    }
}
