// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt;

use crate::disks::{self, FilesystemLayout};
use crate::provisioning::ProvisioningOutput;
use crate::roles::{self, Node, NodeClass};
use crate::sizing::{self, SizingParameters};

/// The shape of a cluster, decided once from how many hosts of each category were provisioned
/// and how many availability zones they span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterTopology {
    Compute,
    StorageSingleAz,
    StorageMultiAz,
    Combined,
}

impl ClusterTopology {
    pub fn detect(compute: usize, storage: usize, descriptor: usize, az_count: usize) -> Self {
        if storage == 0 && compute > 0 {
            Self::Compute
        } else if compute == 0 && storage > 0 && az_count == 1 {
            Self::StorageSingleAz
        } else if compute == 0 && storage > 0 && az_count > 1 && descriptor > 0 {
            Self::StorageMultiAz
        } else {
            Self::Combined
        }
    }

    /// The name used for this kind of cluster in artifact file names and settings keys. Both
    /// storage topologies share a name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::StorageSingleAz | Self::StorageMultiAz => "storage",
            Self::Combined => "combined",
        }
    }

    /// Whether this kind of cluster serves a file system, and therefore needs a storage layout.
    pub fn has_storage(&self) -> bool {
        !matches!(self, Self::Compute)
    }

    /// The tuning profile applied to the cluster.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Compute => "computesncparams",
            Self::StorageSingleAz | Self::StorageMultiAz => "storagesncparams",
            Self::Combined => "scalesncparams",
        }
    }
}

impl fmt::Display for ClusterTopology {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Self::Compute => "compute",
                Self::StorageSingleAz => "storage (single zone)",
                Self::StorageMultiAz => "storage (multi zone)",
                Self::Combined => "combined",
            }
        )
    }
}

/// Provisioned host addresses grouped by category, in provisioning order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeLists {
    pub compute: Vec<String>,
    pub storage: Vec<String>,
    /// Tie-breaker hosts, which only hold a descriptor disk.
    pub descriptor: Vec<String>,
    pub az_count: usize,
}

impl NodeLists {
    pub fn topology(&self) -> ClusterTopology {
        ClusterTopology::detect(
            self.compute.len(),
            self.storage.len(),
            self.descriptor.len(),
            self.az_count,
        )
    }

    pub fn total_node_count(&self) -> usize {
        sizing::total_node_count(
            self.compute.len(),
            self.storage.len(),
            self.descriptor.len(),
            self.az_count,
        )
    }
}

/// ClusterPlan is everything decided about a cluster before any artifact is rendered: its
/// topology, sizing, the role of every host, and the layout of its file system.
///
/// A plan is built from the provisioning output alone and holds no handles to the outside world,
/// so building the same plan twice always gives the same result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterPlan {
    pub topology: ClusterTopology,
    pub az_count: usize,
    pub total_node_count: usize,
    pub sizing: SizingParameters,
    pub nodes: Vec<Node>,
    pub filesystem: Option<FilesystemLayout>,
}

impl ClusterPlan {
    pub fn new(output: &ProvisioningOutput, memory_size_mib: u64, max_pool_gb: u64) -> Self {
        let lists = output.node_lists();
        let topology = lists.topology();
        let total_node_count = lists.total_node_count();
        let sizing = SizingParameters::new(total_node_count, memory_size_mib, max_pool_gb);
        let nodes = roles::assign_roles(&lists, topology, &sizing);

        let filesystem = topology.has_storage().then(|| {
            let disks = disks::disk_entries(
                lists.az_count,
                &output.storage_cluster_with_data_volume_mapping,
                &output.storage_cluster_desc_data_volume_mapping,
            );
            FilesystemLayout::new(
                lists.az_count,
                &output.storage_cluster_filesystem_mountpoint,
                &output.filesystem_block_size,
                disks,
            )
        });

        ClusterPlan {
            topology,
            az_count: lists.az_count,
            total_node_count,
            sizing,
            nodes,
            filesystem,
        }
    }

    pub fn name(&self) -> &'static str {
        self.topology.name()
    }

    /// The address of the primary management host, if one was chosen.
    pub fn gui_address(&self) -> Option<&str> {
        self.nodes
            .iter()
            .find(|node| node.is_gui)
            .map(|node| node.address.as_str())
    }

    pub fn quorum_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_quorum)
    }

    /// The node classes that cluster-wide tunables are applied to.
    pub fn node_classes(&self) -> Vec<NodeClass> {
        match self.topology {
            ClusterTopology::Compute => vec![NodeClass::Compute],
            ClusterTopology::StorageSingleAz => vec![NodeClass::Storage],
            ClusterTopology::StorageMultiAz => {
                vec![NodeClass::Storage, NodeClass::ComputeDescriptor]
            }
            ClusterTopology::Combined if self.az_count == 1 => {
                vec![NodeClass::Storage, NodeClass::Compute]
            }
            ClusterTopology::Combined => vec![
                NodeClass::Storage,
                NodeClass::Compute,
                NodeClass::ComputeDescriptor,
            ],
        }
    }

    /// Whether the file system is synchronously replicated across availability zones.
    pub fn sync_replication(&self) -> bool {
        self.topology.has_storage() && self.az_count > 1
    }

    /// Print a human readable overview of the plan.
    pub fn print_summary(&self) {
        println!("Cluster type: {}", self.topology);
        println!("Availability zones: {}", self.az_count);
        println!("Total nodes: {}", self.total_node_count);
        println!(
            "Quorum nodes: {} (target {})",
            self.quorum_nodes().count(),
            self.sizing.quorum_count
        );
        println!("Manager count: {}", self.sizing.manager_count);
        println!("Pagepool: {}", self.sizing.memory_pool_size);
        match self.gui_address() {
            Some(address) => println!("GUI node: {address}"),
            None => println!("GUI node: none"),
        }

        for node in self.nodes.iter() {
            let mut roles = Vec::new();
            if node.is_quorum {
                roles.push("quorum");
            }
            if node.is_manager {
                roles.push("manager");
            }
            if node.is_gui {
                roles.push("gui");
            }
            if node.is_collector {
                roles.push("collector");
            }
            if node.is_storage_server {
                roles.push("nsd");
            }
            if node.is_admin {
                roles.push("admin");
            }
            println!("  {} [{}] {}", node.address, node.node_class, roles.join(","));
        }

        if let Some(fs) = &self.filesystem {
            println!(
                "Filesystem {} at {}: {} disks, replicas data={} metadata={}",
                fs.filesystem,
                fs.default_mount_point,
                fs.disks.len(),
                fs.default_data_replicas,
                fs.default_metadata_replicas
            );
        }
    }
}
