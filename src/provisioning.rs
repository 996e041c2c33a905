// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::error::Error;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::cluster::NodeLists;

/// ProvisioningOutput is the model for the document written by the provisioning run. Only the
/// keys this tool reads are modeled; any others are ignored.
///
/// Keys that a given provisioning run does not produce (for instance, storage mappings on a
/// compute-only run) are treated as empty, whether they are absent or null.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ProvisioningOutput {
    #[serde(deserialize_with = "null_as_default")]
    pub compute_cluster_instance_private_ips: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub storage_cluster_instance_private_ips: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub storage_cluster_desc_instance_private_ips: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub vpc_availability_zones: Vec<String>,
    /// Storage host address to the data volumes attached to it, in document order.
    #[serde(deserialize_with = "null_as_default")]
    pub storage_cluster_with_data_volume_mapping: IndexMap<String, Vec<String>>,
    /// Tie-breaker host address to its descriptor volume.
    #[serde(deserialize_with = "null_as_default")]
    pub storage_cluster_desc_data_volume_mapping: IndexMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub storage_cluster_filesystem_mountpoint: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filesystem_block_size: String,
    pub resource_prefix: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scale_version: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProvisioningOutput {
    /// Read and parse the provisioning output document at `path`.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let document = std::fs::read_to_string(path).inspect_err(|e| {
            eprintln!("Could not open provisioning output \"{}\": {e}", path.display());
        })?;
        let output = Self::from_json(&document).inspect_err(|e| {
            eprintln!(
                "Provisioning output \"{}\" is not a valid document: {e}",
                path.display()
            );
        })?;
        Ok(output)
    }

    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    pub fn az_count(&self) -> usize {
        self.vpc_availability_zones.len()
    }

    /// The host addresses of each category, in document order.
    pub fn node_lists(&self) -> NodeLists {
        NodeLists {
            compute: self.compute_cluster_instance_private_ips.clone(),
            storage: self.storage_cluster_instance_private_ips.clone(),
            descriptor: self.storage_cluster_desc_instance_private_ips.clone(),
            az_count: self.az_count(),
        }
    }

    /// The name of the cluster: the resource prefix if one was set, or a name derived from the
    /// kind of cluster otherwise.
    pub fn cluster_name(&self, kind: &str) -> String {
        match &self.resource_prefix {
            Some(prefix) if !prefix.is_empty() => prefix.clone(),
            _ => format!("spectrum-scale.{kind}"),
        }
    }
}
