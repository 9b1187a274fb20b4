// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Configuration: environment settings, the cluster configuration document,
//! and the rules combining them with command-line flags.

use crate::error::{ReconcileError, Result};
use crate::types::endpoint::EndpointAccessOverrides;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Region used when neither a flag nor the config file names one
    pub default_region: Option<String>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Self {
        let default_region = env::var("AWS_REGION")
            .or_else(|_| env::var("AWS_DEFAULT_REGION"))
            .ok()
            .filter(|r| !r.is_empty());

        Settings { default_region }
    }
}

/// Declarative cluster configuration document (YAML or JSON)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    #[serde(default)]
    pub metadata: ClusterMeta,
    #[serde(default)]
    pub vpc: VpcConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcConfig {
    #[serde(default)]
    pub cluster_endpoints: ClusterEndpoints,
}

/// Endpoint access as written in the config document; `null` means "not specified"
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterEndpoints {
    #[serde(default)]
    pub private_access: Option<bool>,
    #[serde(default)]
    pub public_access: Option<bool>,
}

impl ClusterConfig {
    /// Read a config document from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ReconcileError::ConfigError(format!("reading {}: {}", path.display(), e))
        })?;
        Self::parse(&raw)
            .map_err(|e| ReconcileError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Parse a config document; JSON is accepted since it is valid YAML
    pub fn parse(raw: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }
}

/// Flags of the endpoint update command that feed the loader
#[derive(Debug, Clone, Default)]
pub struct EndpointFlags {
    pub name: Option<String>,
    pub region: Option<String>,
    pub config_file: Option<PathBuf>,
    pub private_access: Option<bool>,
    pub public_access: Option<bool>,
}

/// Fully resolved input of an endpoint access update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUpdateRequest {
    pub cluster: String,
    pub region: String,
    pub overrides: EndpointAccessOverrides,
}

impl EndpointFlags {
    /// Combine flags, an optional config file and environment settings.
    ///
    /// Flags win over the file, the file wins over the environment. An access
    /// flag the caller did not pass stays unset so the current value is kept.
    pub fn load(self, settings: &Settings) -> Result<EndpointUpdateRequest> {
        let file = match &self.config_file {
            Some(path) => {
                if self.name.is_some() {
                    return Err(ReconcileError::ConfigError(
                        "cannot use --name when --config-file/-f is set".to_string(),
                    ));
                }
                debug!("Loading cluster config from {}", path.display());
                Some(ClusterConfig::from_file(path)?)
            }
            None => None,
        };
        self.resolve(file, settings)
    }

    fn resolve(
        self,
        file: Option<ClusterConfig>,
        settings: &Settings,
    ) -> Result<EndpointUpdateRequest> {
        let file = file.unwrap_or_default();

        let cluster = self
            .name
            .or(file.metadata.name)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                ReconcileError::ConfigError(
                    "--name must be set (or metadata.name in the config file)".to_string(),
                )
            })?;

        let region = self
            .region
            .or(file.metadata.region)
            .or_else(|| settings.default_region.clone())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                ReconcileError::ConfigError(
                    "--region must be set (or metadata.region, or AWS_REGION)".to_string(),
                )
            })?;

        let endpoints = file.vpc.cluster_endpoints;
        let overrides = EndpointAccessOverrides {
            private_access: self.private_access.or(endpoints.private_access),
            public_access: self.public_access.or(endpoints.public_access),
        };

        Ok(EndpointUpdateRequest {
            cluster,
            region,
            overrides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_DOC: &str = r#"
apiVersion: eksctl.io/v1alpha5
kind: ClusterConfig
metadata:
  name: prod
  region: eu-west-1
vpc:
  clusterEndpoints:
    privateAccess: true
    publicAccess: null
"#;

    fn settings(region: Option<&str>) -> Settings {
        Settings {
            default_region: region.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_config_document() {
        let cfg = ClusterConfig::parse(CONFIG_DOC).unwrap();

        assert_eq!(cfg.metadata.name.as_deref(), Some("prod"));
        assert_eq!(cfg.metadata.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cfg.vpc.cluster_endpoints.private_access, Some(true));
        assert_eq!(cfg.vpc.cluster_endpoints.public_access, None);
    }

    #[test]
    fn test_parse_json_document() {
        let cfg = ClusterConfig::parse(
            r#"{"metadata":{"name":"dev"},"vpc":{"clusterEndpoints":{"publicAccess":false}}}"#,
        )
        .unwrap();

        assert_eq!(cfg.metadata.name.as_deref(), Some("dev"));
        assert_eq!(cfg.vpc.cluster_endpoints.public_access, Some(false));
        assert_eq!(cfg.vpc.cluster_endpoints.private_access, None);
    }

    #[test]
    fn test_resolve_from_file_keeps_unset_fields_unset() {
        let file = ClusterConfig::parse(CONFIG_DOC).unwrap();
        let req = EndpointFlags::default()
            .resolve(Some(file), &settings(None))
            .unwrap();

        assert_eq!(req.cluster, "prod");
        assert_eq!(req.region, "eu-west-1");
        assert_eq!(req.overrides.private_access, Some(true));
        assert_eq!(req.overrides.public_access, None);
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = ClusterConfig::parse(CONFIG_DOC).unwrap();
        let flags = EndpointFlags {
            region: Some("us-east-1".to_string()),
            private_access: Some(false),
            ..Default::default()
        };
        let req = flags.resolve(Some(file), &settings(None)).unwrap();

        assert_eq!(req.region, "us-east-1");
        assert_eq!(req.overrides.private_access, Some(false));
    }

    #[test]
    fn test_region_falls_back_to_environment() {
        let flags = EndpointFlags {
            name: Some("dev".to_string()),
            ..Default::default()
        };
        let req = flags.resolve(None, &settings(Some("ap-south-1"))).unwrap();

        assert_eq!(req.region, "ap-south-1");
        assert_eq!(req.overrides, EndpointAccessOverrides::default());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = EndpointFlags::default()
            .resolve(None, &settings(Some("us-west-2")))
            .unwrap_err();

        assert!(matches!(err, ReconcileError::ConfigError(_)));
    }

    #[test]
    fn test_missing_region_is_rejected() {
        let flags = EndpointFlags {
            name: Some("dev".to_string()),
            ..Default::default()
        };
        let err = flags.resolve(None, &settings(None)).unwrap_err();

        assert!(matches!(err, ReconcileError::ConfigError(_)));
    }

    #[test]
    fn test_name_flag_conflicts_with_config_file() {
        let flags = EndpointFlags {
            name: Some("dev".to_string()),
            config_file: Some(PathBuf::from("/nonexistent/cluster.yaml")),
            ..Default::default()
        };
        let err = flags.load(&settings(None)).unwrap_err();

        assert!(err.to_string().contains("cannot use --name"));
    }
}
