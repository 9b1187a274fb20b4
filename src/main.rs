// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cluster_reconciler::addons::AWS_NODE;
use cluster_reconciler::cloud::EksControlPlane;
use cluster_reconciler::config::{EndpointFlags, Settings};
use cluster_reconciler::constants::DEFAULT_TIMEOUT;
use cluster_reconciler::kubernetes::create_client;
use cluster_reconciler::plan::PlanMode;
use cluster_reconciler::reconcilers::{AddonReconciler, EndpointAccessReconciler};

#[derive(Parser)]
#[command(name = "cluster-reconciler")]
#[command(version)]
#[command(about = "Reconcile EKS endpoint access and built-in add-ons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update Kubernetes API endpoint access configuration
    UpdateClusterEndpoints {
        /// EKS cluster name
        #[arg(short, long)]
        name: Option<String>,

        /// AWS region
        #[arg(short, long)]
        region: Option<String>,

        /// Load configuration from a file
        #[arg(short = 'f', long)]
        config_file: Option<PathBuf>,

        /// Access for private (VPC) clients
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        private_access: Option<bool>,

        /// Access for public clients
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        public_access: Option<bool>,

        /// Apply the changes (without it, only the plan is shown)
        #[arg(long)]
        approve: bool,

        /// Maximum time to wait for the update to complete
        #[arg(long, default_value = DEFAULT_TIMEOUT, value_parser = humantime::parse_duration)]
        timeout: Duration,
    },

    /// Update the aws-node add-on to the bundled version
    UpdateAwsNode {
        /// AWS region
        #[arg(short, long)]
        region: Option<String>,

        /// Path to a kubeconfig file (default: inferred from the environment)
        #[arg(long)]
        kubeconfig: Option<PathBuf>,

        /// Apply the changes (without it, only the plan is shown)
        #[arg(long)]
        approve: bool,

        /// Timeout for each Kubernetes API call
        #[arg(long, default_value = DEFAULT_TIMEOUT, value_parser = humantime::parse_duration)]
        timeout: Duration,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::UpdateClusterEndpoints {
            name,
            region,
            config_file,
            private_access,
            public_access,
            approve,
            timeout,
        } => {
            let request = EndpointFlags {
                name,
                region,
                config_file,
                private_access,
                public_access,
            }
            .load(&settings)?;
            info!("using region {}", request.region);

            let control_plane = EksControlPlane::new(&request.region, timeout).await;
            EndpointAccessReconciler::new(control_plane)
                .run(
                    &request.cluster,
                    &request.region,
                    request.overrides,
                    PlanMode::from_approve(approve),
                )
                .await?;
        }
        Commands::UpdateAwsNode {
            region,
            kubeconfig,
            approve,
            timeout,
        } => {
            let region = region
                .or(settings.default_region)
                .context("--region must be set (or AWS_REGION)")?;
            info!("using region {}", region);

            let client = create_client(kubeconfig.as_deref(), timeout).await?;
            AddonReconciler::new(client)
                .update_addon(AWS_NODE, &region, PlanMode::from_approve(approve))
                .await?;
        }
    }

    Ok(())
}
