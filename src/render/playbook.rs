// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

/// Which install roles the playbook runs.
///
/// Hosts built from a prebuilt image already carry the packages, so they skip the prepare and
/// install roles. Without REST initialization the GUI and performance monitoring roles are left
/// out altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybookKind {
    Full,
    Packer,
    NoGui,
    NoGuiPacker,
}

impl PlaybookKind {
    pub fn select(using_packer_image: bool, using_rest_initialization: bool) -> Self {
        match (using_packer_image, using_rest_initialization) {
            (false, true) => Self::Full,
            (true, true) => Self::Packer,
            (false, false) => Self::NoGui,
            (true, false) => Self::NoGuiPacker,
        }
    }
}

/// Render the playbook that drives installation on `hosts`, loading its variables from the
/// cluster configuration file `cluster_config`.
pub fn render_playbook(
    kind: PlaybookKind,
    hosts: &str,
    cluster_config: &str,
    cluster_key_file: &str,
) -> String {
    match kind {
        PlaybookKind::Full => full_playbook(hosts, cluster_config, cluster_key_file),
        PlaybookKind::Packer => format!(
            "---
# Install and config Spectrum Scale on nodes
- hosts: {hosts}
  any_errors_fatal: true
  pre_tasks:
     - include_vars: group_vars/{cluster_config}
  roles:
     - core_configure
     - gui_configure
     - gui_verify
     - perfmon_configure
     - perfmon_verify
"
        ),
        PlaybookKind::NoGui => format!(
            "---
# Install and config Spectrum Scale on nodes
- hosts: {hosts}
  any_errors_fatal: true
  pre_tasks:
     - include_vars: group_vars/{cluster_config}
  roles:
     - core_prepare
     - core_install
     - core_configure
"
        ),
        PlaybookKind::NoGuiPacker => format!(
            "---
# Install and config Spectrum Scale on nodes
- hosts: {hosts}
  any_errors_fatal: true
  pre_tasks:
     - include_vars: group_vars/{cluster_config}
  roles:
     - core_configure
"
        ),
    }
}

/// The full playbook first waits for passwordless SSH to come up on every host, then probes
/// whether the packages are already installed so the install roles can be skipped.
fn full_playbook(hosts: &str, cluster_config: &str, cluster_key_file: &str) -> String {
    format!(
        r#"---
# Ensure provisioned VMs are up and Passwordless SSH setup
# has been completed and operational
- name: Check passwordless SSH connection is setup
  hosts: {hosts}
  any_errors_fatal: true
  gather_facts: false
  connection: local
  tasks:
  - name: Check passwordless SSH on all scale inventory hosts
    shell: ssh {{{{ ansible_ssh_common_args }}}} -i {cluster_key_file} root@{{{{ inventory_hostname }}}} "echo PASSWDLESS_SSH_ENABLED"
    register: result
    until: result.stdout.find("PASSWDLESS_SSH_ENABLED") != -1
    retries: 60
    delay: 10
# Validate Scale packages existence to skip node role
- name: Check if Scale packages already installed on node
  hosts: {hosts}
  gather_facts: false
  vars:
    scale_packages_installed: true
    scale_packages:
      - gpfs.base
      - gpfs.adv
      - gpfs.crypto
      - gpfs.docs
      - gpfs.gpl
      - gpfs.gskit
      - gpfs.gss.pmcollector
      - gpfs.gss.pmsensors
      - gpfs.gui
      - gpfs.java
  tasks:
  - name: Check if scale packages are already installed
    shell: rpm -q "{{{{ item }}}}"
    loop: "{{{{ scale_packages }}}}"
    register: scale_packages_check
    ignore_errors: true

  - name: Set scale packages installation variable
    set_fact:
      scale_packages_installed: false
    when:  item.rc != 0
    loop: "{{{{ scale_packages_check.results }}}}"
    ignore_errors: true

# Install and config Spectrum Scale on nodes
- hosts: {hosts}
  any_errors_fatal: true
  pre_tasks:
     - include_vars: group_vars/{cluster_config}
  roles:
     - core_prepare
     - {{ role: core_install, when: "scale_packages_installed is false" }}
     - core_configure
     - gui_prepare
     - {{ role: gui_install, when: "scale_packages_installed is false" }}
     - gui_configure
     - gui_verify
     - perfmon_prepare
     - {{ role: perfmon_install, when: "scale_packages_installed is false" }}
     - perfmon_configure
     - perfmon_verify
"#
    )
}
