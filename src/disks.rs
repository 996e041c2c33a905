// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::path::Path;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

/// Failure group given to the single tie-breaker descriptor disk.
pub const DESCRIPTOR_FAILURE_GROUP: u8 = 3;

/// How a disk is used by the file system.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskUsage {
    #[serde(rename = "dataAndMetadata")]
    DataAndMetadata,
    #[serde(rename = "descOnly")]
    DescOnly,
}

/// One physical disk served by one storage host. Field order follows the key order used in the
/// storage section of the cluster configuration.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DiskEntry {
    pub device: String,
    #[serde(rename = "failureGroup")]
    pub failure_group: u8,
    pub pool: String,
    pub servers: String,
    pub usage: DiskUsage,
}

impl DiskEntry {
    fn new(device: &str, failure_group: u8, server: &str, usage: DiskUsage) -> Self {
        DiskEntry {
            device: device.to_string(),
            failure_group,
            pool: "system".to_string(),
            servers: server.to_string(),
            usage,
        }
    }
}

/// File system level settings for the storage section of the cluster configuration.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FilesystemLayout {
    #[serde(rename = "automaticMountOption")]
    pub automatic_mount_option: String,
    #[serde(rename = "blockSize")]
    pub block_size: String,
    #[serde(rename = "defaultDataReplicas")]
    pub default_data_replicas: u8,
    #[serde(rename = "defaultMetadataReplicas")]
    pub default_metadata_replicas: u8,
    #[serde(rename = "defaultMountPoint")]
    pub default_mount_point: String,
    pub disks: Vec<DiskEntry>,
    pub filesystem: String,
}

impl FilesystemLayout {
    /// Metadata is always kept in two copies. Data is only replicated when there is a second
    /// availability zone to hold the copy.
    pub fn new(
        az_count: usize,
        mount_point: &str,
        block_size: &str,
        disks: Vec<DiskEntry>,
    ) -> Self {
        let (data_replicas, metadata_replicas) = if az_count > 1 { (2, 2) } else { (1, 2) };
        let filesystem = Path::new(mount_point)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        FilesystemLayout {
            automatic_mount_option: "true".to_string(),
            block_size: block_size.to_string(),
            default_data_replicas: data_replicas,
            default_metadata_replicas: metadata_replicas,
            default_mount_point: mount_point.to_string(),
            disks,
            filesystem,
        }
    }
}

/// Decide the failure group (1 or 2) of every storage host in `disk_mapping`, keyed by address.
///
/// With one availability zone the hosts are split in half by position. With several, hosts on
/// the same subnet as the first host (judged by the third octet of the address) form group 1 and
/// everything else forms group 2. Address layouts whose zone boundaries don't line up with the
/// third octet end up all in one group; this is a known limitation of the heuristic.
pub fn failure_groups(
    az_count: usize,
    disk_mapping: &IndexMap<String, Vec<String>>,
) -> IndexMap<String, u8> {
    if az_count <= 1 {
        let mid_index = disk_mapping.len() / 2;
        return disk_mapping
            .keys()
            .enumerate()
            .map(|(index, address)| {
                let group = if index < mid_index { 1 } else { 2 };
                (address.clone(), group)
            })
            .collect();
    }

    let Some(first) = disk_mapping.keys().next() else {
        return IndexMap::new();
    };
    let first_subnet = third_octet(first);
    disk_mapping
        .keys()
        .map(|address| {
            let subnet = third_octet(address);
            let group = if subnet.is_some() && subnet == first_subnet { 1 } else { 2 };
            (address.clone(), group)
        })
        .collect()
}

/// Build the disk list for the storage section of the cluster configuration.
///
/// Every device of every storage host becomes a data and metadata disk in its host's failure
/// group. If tie-breaker disks are present, only the first device of the first tie-breaker host
/// that has one is added, as a descriptor-only disk in its own failure group.
pub fn disk_entries(
    az_count: usize,
    disk_mapping: &IndexMap<String, Vec<String>>,
    desc_disk_mapping: &IndexMap<String, Vec<String>>,
) -> Vec<DiskEntry> {
    let groups = failure_groups(az_count, disk_mapping);

    let mut disks: Vec<DiskEntry> = disk_mapping
        .iter()
        .flat_map(|(address, devices)| {
            let group = groups[address];
            devices.iter().map(move |device| {
                DiskEntry::new(device, group, address, DiskUsage::DataAndMetadata)
            })
        })
        .collect();

    let tiebreaker = desc_disk_mapping
        .iter()
        .find_map(|(address, devices)| devices.first().map(|device| (address, device)));
    if let Some((address, device)) = tiebreaker {
        disks.push(DiskEntry::new(
            device,
            DESCRIPTOR_FAILURE_GROUP,
            address,
            DiskUsage::DescOnly,
        ));
    }

    disks
}

/// Extract the third octet of a dotted IPv4 address, if the string contains one.
fn third_octet(address: &str) -> Option<&str> {
    static SUBNET: OnceLock<Regex> = OnceLock::new();
    let pattern = SUBNET.get_or_init(|| {
        Regex::new(r"\d{1,3}\.\d{1,3}\.(\d{1,3})\.\d{1,3}").expect("subnet pattern is valid")
    });
    pattern
        .captures(address)
        .and_then(|captures| captures.get(1))
        .map(|octet| octet.as_str())
}
