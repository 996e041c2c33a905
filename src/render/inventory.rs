// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::path::Path;

use crate::cluster::ClusterPlan;
use crate::roles::Node;

/// A jump host that Ansible has to tunnel through to reach the cluster hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bastion {
    pub user: String,
    pub ip: String,
    pub key_file: String,
}

/// How Ansible connects to every host in the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshAccess {
    pub user: String,
    pub key_file: String,
    pub python_interpreter: String,
    pub bastion: Option<Bastion>,
}

impl SshAccess {
    /// The value of `ansible_ssh_common_args`. This is empty unless a bastion is in use, in which
    /// case every connection is proxied through it.
    pub fn common_args(&self) -> String {
        match &self.bastion {
            None => String::new(),
            Some(bastion) => {
                let proxy_command = format!(
                    "ssh -p 22 -o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null \
                     -W %h:%p {}@{} -i {}",
                    bastion.user, bastion.ip, bastion.key_file
                );
                format!(
                    "'-o ControlMaster=auto -o ControlPersist=30m -o UserKnownHostsFile=/dev/null \
                     -o StrictHostKeyChecking=no -o ProxyCommand=\"{proxy_command}\"'"
                )
            }
        }
    }
}

/// Cluster-wide inventory variables, emitted in the `[all:vars]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterVars {
    pub scale_version: String,
    pub cluster_name: String,
    pub gui_username: String,
    pub gui_password: String,
    pub gui_admin_role: String,
    pub sync_replication: bool,
    /// Path to the tuning profile: its file stem names the profile and its parent is the
    /// directory the profile is looked up in.
    pub profile_path: String,
}

/// Ansible inventories spell booleans the way Python does.
fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Format the inventory line for a single host.
pub fn host_line(node: &Node, access: &SshAccess) -> String {
    format!(
        "{} scale_cluster_quorum={} scale_cluster_manager={} scale_cluster_gui={} \
         scale_zimon_collector={} is_nsd_server={} is_admin_node={} ansible_user={} \
         ansible_ssh_private_key_file={} ansible_python_interpreter={} scale_nodeclass={} \
         ansible_ssh_common_args={}",
        node.address,
        py_bool(node.is_quorum),
        py_bool(node.is_manager),
        py_bool(node.is_gui),
        py_bool(node.is_collector),
        py_bool(node.is_storage_server),
        py_bool(node.is_admin),
        access.user,
        access.key_file,
        access.python_interpreter,
        node.node_class,
        access.common_args(),
    )
}

/// Render the full inventory: every host under `[scale_nodes]` in plan order, followed by the
/// cluster-wide variables.
pub fn render_inventory(plan: &ClusterPlan, access: &SshAccess, vars: &ClusterVars) -> String {
    let mut out = String::from("[scale_nodes]\n");
    for node in plan.nodes.iter() {
        out.push_str(&host_line(node, access));
        out.push('\n');
    }

    let profile = Path::new(&vars.profile_path);
    let profile_name = profile
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let profile_dir = profile
        .parent()
        .map(|dir| dir.to_string_lossy().to_string())
        .unwrap_or_default();

    let entries = [
        ("scale_version", vars.scale_version.as_str()),
        ("scale_cluster_clustername", vars.cluster_name.as_str()),
        ("scale_service_gui_start", "True"),
        ("scale_gui_admin_user", vars.gui_username.as_str()),
        ("scale_gui_admin_password", vars.gui_password.as_str()),
        ("scale_gui_admin_role", vars.gui_admin_role.as_str()),
        ("scale_sync_replication_config", py_bool(vars.sync_replication)),
        ("scale_cluster_profile_name", profile_name.as_str()),
        ("scale_cluster_profile_dir_path", profile_dir.as_str()),
    ];

    out.push_str("[all:vars]\n");
    for (key, value) in entries {
        out.push_str(&format!("{key} = {value}\n"));
    }
    out.push('\n');
    out
}
