// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::error::Error;

use serde::{Deserialize, Serialize};

/// Settings holds the tunables that are the same for every provisioning run at a site, read from
/// the scaleinv settings file. Every key is optional; missing keys take their default.
///
/// Values that change from run to run (paths, credentials, instance memory) come from the command
/// line instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The user Ansible logs in to the hosts as.
    pub ansible_user: String,
    pub python_interpreter: String,
    pub ephemeral_port_range: String,
    /// Name of the install tooling checkout under the install infra path.
    pub install_infra_dir: String,
    pub gui_admin_role: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ansible_user: "root".to_string(),
            python_interpreter: "/usr/bin/python3".to_string(),
            ephemeral_port_range: "60000-61000".to_string(),
            install_infra_dir: "ibm-spectrum-scale-install-infra".to_string(),
            gui_admin_role: "Administrator".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location if no path was given.
    ///
    /// A file that was asked for explicitly must exist. The default file is optional, and the
    /// built-in defaults are used when it is absent.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let (path, explicit) = match path {
            Some(path) => (path.to_string(), true),
            None => (crate::default_config_path(), false),
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings file at \"{path}\", using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                eprintln!("Could not open settings file \"{path}\": {e}");
                return Err(e.into());
            }
        };

        let settings = toml::from_str(&contents).inspect_err(|e| {
            eprintln!("Could not parse settings file \"{path}\": {e}");
        })?;
        Ok(settings)
    }
}
