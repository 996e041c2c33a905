// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod cluster;
pub mod commands;
pub mod config;
pub mod disks;
pub mod provisioning;
pub mod render;
pub mod roles;
pub mod sizing;

pub fn default_config_path() -> String {
    match std::env::var("SCALEINV_CONFIG") {
        Ok(conf) => conf,
        Err(_) => "/etc/scaleinv/scaleinv.toml".to_string(),
    }
}

/// The log filter used when `SCALEINV_LOG` is not set.
pub fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}
