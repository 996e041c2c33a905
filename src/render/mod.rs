// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Renderers that turn a [`ClusterPlan`](crate::cluster::ClusterPlan) into the files the install
//! tooling consumes. None of the renderers make placement decisions; they only format what the
//! plan already holds.

pub mod group_vars;
pub mod gui;
pub mod inventory;
pub mod playbook;

use std::io;
use std::path::{Path, PathBuf};

/// The host group every playbook targets.
pub const HOSTS_GROUP: &str = "scale_nodes";

/// Where each artifact for a cluster named `kind` is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub inventory: PathBuf,
    pub playbook: PathBuf,
    pub group_vars_dir: PathBuf,
    pub group_vars: PathBuf,
    pub gui_details: PathBuf,
}

impl ArtifactPaths {
    /// Artifacts for the install tooling go into its checkout (`install_infra_path` joined with
    /// `install_infra_dir`). The GUI details document goes next to the provisioning output.
    pub fn new(
        install_infra_path: &Path,
        install_infra_dir: &str,
        provisioning_output: &Path,
        kind: &str,
    ) -> Self {
        let infra = install_infra_path.join(install_infra_dir);
        let group_vars_dir = infra.join("group_vars");
        let output_dir = provisioning_output
            .parent()
            .unwrap_or_else(|| Path::new("."));

        ArtifactPaths {
            inventory: infra.join(format!("{kind}_inventory.ini")),
            playbook: infra.join(format!("{kind}_cloud_playbook.yaml")),
            group_vars: group_vars_dir.join(cluster_config_name(kind)),
            group_vars_dir,
            gui_details: output_dir.join(format!("{kind}_cluster_gui_details.json")),
        }
    }

    /// Remove artifacts left behind by an earlier run, so that stale files never survive a run
    /// that no longer produces them.
    pub fn cleanup(&self) -> io::Result<()> {
        for path in [
            &self.inventory,
            &self.gui_details,
            &self.playbook,
            &self.group_vars,
        ] {
            match std::fs::remove_file(path) {
                Ok(()) => log::debug!("removed stale artifact {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// File name of the cluster configuration document, relative to the group vars directory.
pub fn cluster_config_name(kind: &str) -> String {
    format!("{kind}_cluster_config.yaml")
}
