// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt;

use crate::cluster::{ClusterTopology, NodeLists};
use crate::sizing::SizingParameters;

/// The node class a host is placed in. Node classes are how cluster-wide tunables (like the
/// pagepool) get targeted at groups of hosts in the cluster configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Compute,
    Storage,
    /// Tie-breaker hosts that only hold a file system descriptor disk.
    ComputeDescriptor,
}

impl NodeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "computenodegrp",
            Self::Storage => "storagenodegrp",
            Self::ComputeDescriptor => "computedescnodegrp",
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// The structural role flags for a single host, as decided by its position in its category list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Role {
    pub is_quorum: bool,
    pub is_manager: bool,
    pub is_gui: bool,
    pub is_collector: bool,
    pub is_admin: bool,
}

impl Role {
    fn quorum() -> Self {
        Role {
            is_quorum: true,
            ..Default::default()
        }
    }
}

/// A provisioned host together with every role it was assigned. Nodes are only built by role
/// assignment and are not changed afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub address: String,
    pub is_quorum: bool,
    pub is_manager: bool,
    pub is_gui: bool,
    pub is_collector: bool,
    pub is_storage_server: bool,
    pub is_admin: bool,
    pub node_class: NodeClass,
}

impl Node {
    fn new(address: &str, role: Role, is_storage_server: bool, node_class: NodeClass) -> Self {
        Node {
            address: address.to_string(),
            is_quorum: role.is_quorum,
            is_manager: role.is_manager,
            is_gui: role.is_gui,
            is_collector: role.is_collector,
            is_storage_server,
            is_admin: role.is_admin,
            node_class,
        }
    }
}

/// Decide the role of the host at `index` in its category list.
///
/// `quorum_budget` is how many hosts of this category may become quorum nodes. The first host
/// within budget is the primary management host (GUI, collector, and admin); the second is a
/// secondary collector, and also an admin node when `secondary_admin` is set. Hosts below
/// `manager_count` are manager-eligible.
pub fn assign_role(
    index: usize,
    quorum_budget: usize,
    manager_count: usize,
    secondary_admin: bool,
) -> Role {
    if index >= quorum_budget {
        return Role::default();
    }
    if index >= manager_count {
        return Role::quorum();
    }

    match index {
        0 => Role {
            is_quorum: true,
            is_manager: true,
            is_gui: true,
            is_collector: true,
            is_admin: true,
        },
        1 => Role {
            is_quorum: true,
            is_manager: true,
            is_gui: false,
            is_collector: true,
            is_admin: secondary_admin,
        },
        _ => Role {
            is_quorum: true,
            is_manager: true,
            ..Default::default()
        },
    }
}

/// Assign roles to every host in `lists`.
///
/// The result holds tie-breaker hosts first, then storage hosts, then compute hosts, each in
/// their input order. Only the categories that `topology` uses are emitted.
pub fn assign_roles(
    lists: &NodeLists,
    topology: ClusterTopology,
    sizing: &SizingParameters,
) -> Vec<Node> {
    let quorum_count = sizing.quorum_count;
    let manager_count = sizing.manager_count;

    match topology {
        ClusterTopology::Compute => {
            category_nodes(&lists.compute, quorum_count, manager_count, false, NodeClass::Compute)
        }
        ClusterTopology::StorageSingleAz => {
            category_nodes(&lists.storage, quorum_count, manager_count, false, NodeClass::Storage)
        }
        ClusterTopology::StorageMultiAz => {
            descriptor_and_storage_nodes(lists, quorum_count, manager_count)
        }
        ClusterTopology::Combined => {
            let mut nodes = descriptor_and_storage_nodes(lists, quorum_count, manager_count);

            let placed = nodes.iter().filter(|node| node.is_quorum).count();
            let shortfall = quorum_count.saturating_sub(placed);
            nodes.extend(shortfall_nodes(&lists.compute, shortfall));
            nodes
        }
    }
}

/// Tie-breaker hosts take their quorum seats first; storage hosts share whatever is left.
fn descriptor_and_storage_nodes(
    lists: &NodeLists,
    quorum_count: usize,
    manager_count: usize,
) -> Vec<Node> {
    let mut nodes = descriptor_nodes(&lists.descriptor);
    let storage_budget = quorum_count.saturating_sub(nodes.len());
    nodes.extend(category_nodes(
        &lists.storage,
        storage_budget,
        manager_count,
        true,
        NodeClass::Storage,
    ));
    nodes
}

fn category_nodes(
    addresses: &[String],
    quorum_budget: usize,
    manager_count: usize,
    secondary_admin: bool,
    class: NodeClass,
) -> Vec<Node> {
    let is_storage_server = class == NodeClass::Storage;
    addresses
        .iter()
        .enumerate()
        .map(|(index, address)| {
            let role = assign_role(index, quorum_budget, manager_count, secondary_admin);
            Node::new(address, role, is_storage_server, class)
        })
        .collect()
}

fn descriptor_nodes(addresses: &[String]) -> Vec<Node> {
    addresses
        .iter()
        .map(|address| Node::new(address, Role::quorum(), true, NodeClass::ComputeDescriptor))
        .collect()
}

/// Compute hosts in a combined cluster only fill quorum seats the storage side could not. Those
/// that do are admin nodes as well, but never managers.
fn shortfall_nodes(addresses: &[String], shortfall: usize) -> Vec<Node> {
    addresses
        .iter()
        .enumerate()
        .map(|(index, address)| {
            let role = if index < shortfall {
                Role {
                    is_quorum: true,
                    is_admin: true,
                    ..Default::default()
                }
            } else {
                Role::default()
            };
            Node::new(address, role, false, NodeClass::Compute)
        })
        .collect()
}
