// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use scaleinv_lib::{
        cluster::ClusterPlan,
        disks::{disk_entries, failure_groups, DiskUsage},
        provisioning::ProvisioningOutput,
    };

    fn storage_mapping(count: usize, third_octets: &[u8]) -> IndexMap<String, Vec<String>> {
        (0..count)
            .map(|i| {
                let octet = third_octets[i % third_octets.len()];
                (
                    format!("10.241.{octet}.{}", i + 4),
                    vec!["/dev/vdb".to_string(), "/dev/vdc".to_string()],
                )
            })
            .collect()
    }

    #[test]
    fn single_zone_halves_are_balanced() {
        for count in 0..25 {
            let groups = failure_groups(1, &storage_mapping(count, &[1]));
            let first = groups.values().filter(|g| **g == 1).count();
            let second = groups.values().filter(|g| **g == 2).count();

            assert_eq!(first + second, count);
            assert!(first.abs_diff(second) <= 1);
            assert!(second >= first);
        }
    }

    #[test]
    fn single_zone_keeps_mapping_order() {
        let mapping = storage_mapping(4, &[1]);
        let entries = disk_entries(1, &mapping, &IndexMap::new());
        let groups: Vec<(String, u8)> = entries
            .iter()
            .map(|e| (e.servers.clone(), e.failure_group))
            .collect();

        assert_eq!(
            groups,
            vec![
                ("10.241.1.4".to_string(), 1),
                ("10.241.1.4".to_string(), 1),
                ("10.241.1.5".to_string(), 1),
                ("10.241.1.5".to_string(), 1),
                ("10.241.1.6".to_string(), 2),
                ("10.241.1.6".to_string(), 2),
                ("10.241.1.7".to_string(), 2),
                ("10.241.1.7".to_string(), 2),
            ]
        );
    }

    #[test]
    fn multi_zone_follows_first_subnet() {
        let mapping = storage_mapping(6, &[1, 65]);
        let groups = failure_groups(3, &mapping);
        for (address, group) in groups.iter() {
            let expected = if address.starts_with("10.241.1.") { 1 } else { 2 };
            assert_eq!(*group, expected, "{address}");
        }
    }

    #[test]
    fn storage_plan_from_document() {
        let output = ProvisioningOutput::from_json(include_str!("fixtures/storage_multi_az.json"))
            .unwrap();
        let plan = ClusterPlan::new(&output, 16384, 100);
        let fs = plan.filesystem.unwrap();

        assert_eq!(fs.filesystem, "fs1");
        assert_eq!(fs.block_size, "1M");
        assert_eq!(fs.default_data_replicas, 2);
        assert_eq!(fs.disks.len(), 5);

        let tiebreakers: Vec<_> = fs
            .disks
            .iter()
            .filter(|d| d.usage == DiskUsage::DescOnly)
            .collect();
        assert_eq!(tiebreakers.len(), 1);
        assert_eq!(tiebreakers[0].servers, "10.241.129.4");
        assert_eq!(tiebreakers[0].failure_group, 3);

        let group_one: Vec<&str> = fs
            .disks
            .iter()
            .filter(|d| d.failure_group == 1)
            .map(|d| d.servers.as_str())
            .collect();
        assert_eq!(group_one, vec!["10.241.1.4", "10.241.1.5"]);
    }
}
