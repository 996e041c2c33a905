// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use scaleinv_lib::{
        cluster::{ClusterTopology, NodeLists},
        roles::{assign_roles, Node, NodeClass},
        sizing::{quorum_count, SizingParameters, MANAGER_COUNT},
    };

    fn addresses(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}.{}", i + 4)).collect()
    }

    fn lists(compute: usize, storage: usize, descriptor: usize, az_count: usize) -> NodeLists {
        NodeLists {
            compute: addresses("10.241.0", compute),
            storage: addresses("10.241.1", storage),
            descriptor: addresses("10.241.129", descriptor),
            az_count,
        }
    }

    fn sizing_for(quorum_count: usize) -> SizingParameters {
        SizingParameters {
            quorum_count,
            manager_count: MANAGER_COUNT,
            memory_pool_size: "1G".to_string(),
        }
    }

    /// Assign roles the way a real run does: topology and quorum size both follow from the lists.
    fn plan(lists: &NodeLists) -> Vec<Node> {
        let sizing = sizing_for(quorum_count(lists.total_node_count()));
        assign_roles(lists, lists.topology(), &sizing)
    }

    fn quorum(nodes: &[Node]) -> usize {
        nodes.iter().filter(|n| n.is_quorum).count()
    }

    fn gui(nodes: &[Node]) -> usize {
        nodes.iter().filter(|n| n.is_gui).count()
    }

    #[test]
    fn compute_cluster() {
        let lists = lists(5, 0, 0, 1);
        assert_eq!(lists.topology(), ClusterTopology::Compute);
        let nodes = plan(&lists);

        assert_eq!(nodes.len(), 5);
        assert!(nodes.iter().all(|n| n.node_class == NodeClass::Compute));
        assert!(nodes.iter().all(|n| !n.is_storage_server));

        let primary = &nodes[0];
        assert!(primary.is_quorum && primary.is_manager && primary.is_gui);
        assert!(primary.is_collector && primary.is_admin);

        let secondary = &nodes[1];
        assert!(secondary.is_quorum && secondary.is_manager && secondary.is_collector);
        assert!(!secondary.is_gui && !secondary.is_admin);

        let third = &nodes[2];
        assert!(third.is_quorum);
        assert!(!third.is_manager && !third.is_collector && !third.is_admin);

        assert!(nodes[3..].iter().all(|n| !n.is_quorum && !n.is_admin));
        assert_eq!(quorum(&nodes), 3);
        assert_eq!(gui(&nodes), 1);
    }

    #[test]
    fn storage_single_zone() {
        let lists = lists(0, 4, 0, 1);
        assert_eq!(lists.topology(), ClusterTopology::StorageSingleAz);
        let nodes = plan(&lists);

        assert_eq!(nodes.len(), 4);
        assert!(nodes.iter().all(|n| n.is_storage_server));
        assert!(nodes.iter().all(|n| n.node_class == NodeClass::Storage));
        assert_eq!(quorum(&nodes), 3);
        assert!(nodes[0].is_gui && nodes[0].is_admin);
        assert!(!nodes[1].is_admin);
        assert!(!nodes[3].is_quorum);
    }

    #[test]
    fn storage_multi_zone() {
        let lists = lists(0, 4, 1, 3);
        assert_eq!(lists.topology(), ClusterTopology::StorageMultiAz);
        let nodes = plan(&lists);

        assert_eq!(nodes.len(), 5);
        let tiebreaker = &nodes[0];
        assert_eq!(tiebreaker.address, "10.241.129.4");
        assert_eq!(tiebreaker.node_class, NodeClass::ComputeDescriptor);
        assert!(tiebreaker.is_quorum && tiebreaker.is_storage_server);
        assert!(!tiebreaker.is_manager && !tiebreaker.is_gui && !tiebreaker.is_admin);

        // One quorum seat is held by the tie-breaker, leaving two for storage.
        assert!(nodes[1].is_gui && nodes[1].is_admin);
        assert!(nodes[2].is_quorum && nodes[2].is_manager && nodes[2].is_admin);
        assert!(!nodes[3].is_quorum && !nodes[4].is_quorum);
        assert_eq!(quorum(&nodes), 3);
        assert_eq!(gui(&nodes), 1);
    }

    #[test]
    fn combined_single_zone() {
        let lists = lists(4, 2, 0, 1);
        assert_eq!(lists.topology(), ClusterTopology::Combined);
        let nodes = plan(&lists);

        let classes: Vec<NodeClass> = nodes.iter().map(|n| n.node_class).collect();
        assert_eq!(
            classes,
            vec![
                NodeClass::Storage,
                NodeClass::Storage,
                NodeClass::Compute,
                NodeClass::Compute,
                NodeClass::Compute,
                NodeClass::Compute,
            ]
        );

        // Both storage hosts are quorum nodes; the third seat goes to the first compute host.
        assert!(nodes[0].is_gui);
        assert!(nodes[1].is_quorum && nodes[1].is_admin);
        let borrowed = &nodes[2];
        assert!(borrowed.is_quorum && borrowed.is_admin);
        assert!(!borrowed.is_manager && !borrowed.is_gui && !borrowed.is_collector);
        assert!(nodes[3..].iter().all(|n| !n.is_quorum && !n.is_admin));
        assert_eq!(quorum(&nodes), 3);
    }

    #[test]
    fn combined_multi_zone() {
        let lists = lists(10, 2, 1, 3);
        assert_eq!(lists.total_node_count(), 13);
        let nodes = plan(&lists);

        assert_eq!(nodes[0].node_class, NodeClass::ComputeDescriptor);
        assert_eq!(nodes[1].node_class, NodeClass::Storage);
        assert_eq!(nodes[3].node_class, NodeClass::Compute);
        // Five seats: the tie-breaker, both storage hosts, then two compute hosts.
        assert_eq!(quorum(&nodes), 5);
        assert!(nodes[3].is_quorum && nodes[4].is_quorum);
        assert!(!nodes[5].is_quorum);
    }

    #[test]
    fn combined_without_storage_borrows_every_seat() {
        let lists = lists(3, 0, 0, 1);
        let nodes = assign_roles(&lists, ClusterTopology::Combined, &sizing_for(3));

        assert_eq!(nodes.len(), 3);
        for node in nodes.iter() {
            assert!(node.is_quorum && node.is_admin);
            assert!(!node.is_manager && !node.is_gui && !node.is_collector);
            assert_eq!(node.node_class, NodeClass::Compute);
        }
    }

    #[test]
    fn quorum_larger_than_category() {
        let lists = lists(0, 2, 0, 1);
        let nodes = assign_roles(&lists, ClusterTopology::StorageSingleAz, &sizing_for(7));
        assert_eq!(quorum(&nodes), 2);
    }

    #[test]
    fn empty_lists() {
        let empty = lists(0, 0, 0, 0);
        for topology in [
            ClusterTopology::Compute,
            ClusterTopology::StorageSingleAz,
            ClusterTopology::StorageMultiAz,
            ClusterTopology::Combined,
        ] {
            assert!(assign_roles(&empty, topology, &sizing_for(3)).is_empty());
        }
        assert!(plan(&empty).is_empty());
    }

    #[test]
    fn one_gui_per_cluster() {
        for count in 1..30 {
            assert_eq!(gui(&plan(&lists(count, 0, 0, 1))), 1);
            assert_eq!(gui(&plan(&lists(0, count, 0, 1))), 1);
            assert_eq!(gui(&plan(&lists(0, count, 1, 3))), 1);
            assert_eq!(gui(&plan(&lists(count, count, 0, 1))), 1);
        }
    }

    #[test]
    fn quorum_matches_eligible_hosts() {
        for count in 1..30 {
            let nodes = plan(&lists(count, 0, 0, 1));
            assert_eq!(quorum(&nodes), quorum_count(count).min(count));

            let nodes = plan(&lists(0, count, 0, 1));
            assert_eq!(quorum(&nodes), quorum_count(count).min(count));

            let multi = lists(0, count, 1, 3);
            let target = quorum_count(multi.total_node_count());
            assert_eq!(quorum(&plan(&multi)), target.min(count + 1));

            let nodes = plan(&lists(count, 2, 0, 1));
            assert_eq!(quorum(&nodes), quorum_count(count + 2));

            // Several zones but no tie-breaker: no seat is held back.
            let nodes = plan(&lists(0, count, 0, 2));
            assert_eq!(quorum(&nodes), quorum_count(count).min(count));
            assert_eq!(gui(&nodes), 1);
        }
    }

    #[test]
    fn zones_without_tiebreaker() {
        let lists = lists(0, 1, 0, 2);
        assert_eq!(lists.topology(), ClusterTopology::Combined);
        let nodes = plan(&lists);

        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].is_quorum && nodes[0].is_gui && nodes[0].is_admin);
    }

    #[test]
    fn single_zone_tiebreaker_shares_quorum() {
        let lists = lists(1, 3, 1, 1);
        assert_eq!(lists.topology(), ClusterTopology::Combined);
        let nodes = plan(&lists);

        assert_eq!(nodes[0].node_class, NodeClass::ComputeDescriptor);
        assert!(nodes[0].is_quorum);
        assert_eq!(quorum(&nodes), 3);
        assert!(!nodes[3].is_quorum);
        assert!(!nodes[4].is_quorum);
        assert_eq!(gui(&nodes), 1);
    }

    #[test]
    fn same_input_same_roles() {
        let lists = lists(7, 5, 1, 3);
        assert_eq!(plan(&lists), plan(&lists));
    }
}
