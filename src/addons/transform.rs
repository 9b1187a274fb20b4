// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registry rewrite of add-on container images

use crate::constants::registry::{AWS_NODE_REPOSITORIES, DEFAULT_ACCOUNT_ID, DOMAIN, DOMAIN_CN};
use crate::error::{ReconcileError, Result};
use kube::api::DynamicObject;
use tracing::debug;

/// Account hosting the add-on images for a region
pub fn registry_account_id(region: &str) -> &'static str {
    match region {
        "ap-east-1" => "800184023465",
        "me-south-1" => "558608220178",
        "cn-north-1" => "918309763551",
        "cn-northwest-1" => "961992271922",
        "us-gov-west-1" => "013241004608",
        "us-gov-east-1" => "151742754352",
        "af-south-1" => "877085696533",
        "eu-south-1" => "590381155156",
        _ => DEFAULT_ACCOUNT_ID,
    }
}

fn registry_domain(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        DOMAIN_CN
    } else {
        DOMAIN
    }
}

/// Point an upstream image at the regional registry, keeping its tag.
///
/// Images from other registries are returned untouched so operator overrides
/// survive. An image without exactly one `:` is rejected.
pub fn rewrite_image(image: &str, region: &str, addon: &str) -> Result<String> {
    let (repository, tag) = match image.split(':').collect::<Vec<_>>().as_slice() {
        [repository, tag] => (*repository, *tag),
        _ => {
            return Err(ReconcileError::ImageFormat {
                image: image.to_string(),
                addon: addon.to_string(),
            })
        }
    };

    let upstream = AWS_NODE_REPOSITORIES.iter().find(|name| {
        [DOMAIN, DOMAIN_CN]
            .iter()
            .any(|domain| repository.ends_with(&format!(".{}/{}", domain, name)))
    });
    let Some(path) = upstream else {
        return Ok(image.to_string());
    };

    Ok(format!(
        "{}.dkr.ecr.{}.{}/{}:{}",
        registry_account_id(region),
        region,
        registry_domain(region),
        path,
        tag
    ))
}

/// Rewrite every container and init container image in a workload's pod template
pub fn rewrite_workload_images(object: &mut DynamicObject, region: &str, addon: &str) -> Result<()> {
    let Some(pod_spec) = object
        .data
        .pointer_mut("/spec/template/spec")
        .and_then(|s| s.as_object_mut())
    else {
        return Err(ReconcileError::InvalidResource(format!(
            "{} workload has no pod template",
            addon
        )));
    };

    for field in ["initContainers", "containers"] {
        let Some(containers) = pod_spec.get_mut(field).and_then(|c| c.as_array_mut()) else {
            continue;
        };
        for container in containers {
            let Some(image) = container.get("image").and_then(|i| i.as_str()) else {
                continue;
            };
            let rewritten = rewrite_image(image, region, addon)?;
            debug!("{} image {} -> {}", addon, image, rewritten);
            container["image"] = serde_json::Value::String(rewritten);
        }
    }

    Ok(())
}
