// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

/// Number of manager-eligible nodes placed in every cluster. This is a fixed policy: the pool of
/// nodes from which file system and token managers are chosen is always two nodes, regardless of
/// cluster size.
pub const MANAGER_COUNT: usize = 2;

/// Pagepool ceiling used when the caller does not provide one.
pub const DEFAULT_MAX_POOL_GB: u64 = 1;

/// Derived cluster-wide sizing values. These are computed once per run and handed read-only to
/// role assignment and to the configuration renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingParameters {
    pub quorum_count: usize,
    pub manager_count: usize,
    /// Pagepool size formatted for the cluster configuration, e.g. "4G".
    pub memory_pool_size: String,
}

impl SizingParameters {
    pub fn new(total_node_count: usize, memory_size_mib: u64, max_pool_gb: u64) -> Self {
        SizingParameters {
            quorum_count: quorum_count(total_node_count),
            manager_count: MANAGER_COUNT,
            memory_pool_size: calculate_pool_size(memory_size_mib, max_pool_gb),
        }
    }
}

/// The number of quorum nodes to place in a cluster of `total_node_count` nodes.
pub fn quorum_count(total_node_count: usize) -> usize {
    match total_node_count {
        0..=3 => total_node_count,
        4..=9 => 3,
        10..=18 => 5,
        _ => 7,
    }
}

/// Count the nodes that take part in quorum sizing. Tie-breaker nodes only exist, and only count,
/// when the cluster spans more than one availability zone.
pub fn total_node_count(compute: usize, storage: usize, descriptor: usize, az_count: usize) -> usize {
    if az_count > 1 {
        compute + storage + descriptor
    } else {
        compute + storage
    }
}

/// Pagepool size in whole gigabytes for an instance with `memory_size_mib` of memory.
///
/// Each conversion step truncates before the next multiplication. Changing that order changes
/// the result for values near a gigabyte boundary, so it must stay as is.
pub fn pagepool_gb(memory_size_mib: u64, max_pool_gb: u64) -> u64 {
    // 1 MiB = 1.048576 MB
    let mem_size_mb = (memory_size_mib as f64 * 1.048576).floor();
    // 1 MB = 0.001 GB
    let mem_size_gb = (mem_size_mb * 0.001).floor();
    let candidate = ((mem_size_gb * 0.25).floor() as u64).max(1);

    candidate.min(max_pool_gb).max(1)
}

/// Pagepool size formatted as the cluster configuration expects it.
pub fn calculate_pool_size(memory_size_mib: u64, max_pool_gb: u64) -> String {
    format!("{}G", pagepool_gb(memory_size_mib, max_pool_gb))
}
