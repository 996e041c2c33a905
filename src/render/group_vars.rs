// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cluster::ClusterPlan;
use crate::disks::FilesystemLayout;

#[derive(Serialize, Debug)]
struct ClusterConfigVars {
    ephemeral_port_range: String,
}

#[derive(Serialize, Debug)]
struct NodeClassParams {
    nodeclass: String,
    params: Vec<BTreeMap<String, String>>,
}

/// The tunables section of the cluster configuration: the pagepool for every node class, plus
/// cluster-wide settings.
#[derive(Serialize, Debug)]
struct TunablesDocument {
    scale_cluster_config: ClusterConfigVars,
    scale_config: Vec<NodeClassParams>,
}

#[derive(Serialize, Debug)]
struct StorageDocument<'a> {
    scale_storage: Vec<&'a FilesystemLayout>,
}

/// Render the cluster configuration document. The storage section is only present for clusters
/// that serve a file system.
pub fn render_group_vars(
    plan: &ClusterPlan,
    ephemeral_port_range: &str,
) -> Result<String, serde_yaml::Error> {
    let tunables = TunablesDocument {
        scale_cluster_config: ClusterConfigVars {
            ephemeral_port_range: ephemeral_port_range.to_string(),
        },
        scale_config: plan
            .node_classes()
            .into_iter()
            .map(|class| NodeClassParams {
                nodeclass: class.to_string(),
                params: vec![BTreeMap::from([(
                    "pagepool".to_string(),
                    plan.sizing.memory_pool_size.clone(),
                )])],
            })
            .collect(),
    };

    let mut out = serde_yaml::to_string(&tunables)?;

    if let Some(filesystem) = &plan.filesystem {
        let storage = StorageDocument {
            scale_storage: vec![filesystem],
        };
        out.push_str(&serde_yaml::to_string(&storage)?);
    }

    Ok(out)
}
