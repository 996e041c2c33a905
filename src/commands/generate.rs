// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args};

use crate::{
    commands::{Cli, Handle, HandledResult, PlanInput},
    config::Settings,
    render::{
        self,
        group_vars::render_group_vars,
        gui::write_gui_details,
        inventory::{render_inventory, Bastion, ClusterVars, SshAccess},
        playbook::{render_playbook, PlaybookKind},
        ArtifactPaths,
    },
};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: PlanInput,

    /// Parent directory of the install tooling checkout
    #[arg(long, alias = "install_infra_path")]
    pub install_infra_path: PathBuf,

    /// SSH private key used to reach the cluster instances
    #[arg(long, alias = "instance_private_key")]
    pub instance_private_key: String,

    #[arg(long, alias = "bastion_user")]
    pub bastion_user: Option<String>,

    #[arg(long, alias = "bastion_ip")]
    pub bastion_ip: Option<String>,

    /// SSH private key for the bastion. When set, every connection is proxied through the bastion.
    #[arg(
        long,
        alias = "bastion_ssh_private_key",
        requires_all = ["bastion_user", "bastion_ip"]
    )]
    pub bastion_ssh_private_key: Option<String>,

    /// Instances were built from an image that already has the packages installed
    #[arg(long, alias = "using_packer_image", action = ArgAction::Set, default_value_t = false)]
    pub using_packer_image: bool,

    /// Install and configure the GUI and performance monitoring
    #[arg(
        long,
        alias = "using_rest_initialization",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub using_rest_initialization: bool,

    #[arg(long, alias = "gui_username")]
    pub gui_username: String,

    #[arg(long, alias = "gui_password")]
    pub gui_password: String,
}

impl GenerateArgs {
    fn bastion(&self) -> Option<Bastion> {
        let key_file = self.bastion_ssh_private_key.as_ref()?;
        Some(Bastion {
            user: self.bastion_user.clone().unwrap_or_default(),
            ip: self.bastion_ip.clone().unwrap_or_default(),
            key_file: key_file.clone(),
        })
    }
}

pub fn generate(cli: &Cli, args: &GenerateArgs) -> HandledResult<()> {
    // Settings::load reports its own errors.
    let settings = Settings::load(cli.config.as_deref()).handle_err(|_| {})?;
    let (output, plan) = args.input.load()?;
    let kind = plan.name();

    println!("Identified cluster type: {kind}");

    let paths = ArtifactPaths::new(
        &args.install_infra_path,
        &settings.install_infra_dir,
        &args.input.tf_inv_path,
        kind,
    );
    paths.cleanup().handle_err(|e| {
        eprintln!("Could not remove artifacts of a previous run: {e}");
    })?;

    std::fs::create_dir_all(&paths.group_vars_dir).handle_err(|e| {
        eprintln!(
            "Could not create directory \"{}\": {e}",
            paths.group_vars_dir.display()
        );
    })?;

    let cluster_config = render::cluster_config_name(kind);
    let playbook = render_playbook(
        PlaybookKind::select(args.using_packer_image, args.using_rest_initialization),
        render::HOSTS_GROUP,
        &cluster_config,
        &args.instance_private_key,
    );
    write_artifact(&paths.playbook, &playbook)?;

    let access = SshAccess {
        user: settings.ansible_user.clone(),
        key_file: args.instance_private_key.clone(),
        python_interpreter: settings.python_interpreter.clone(),
        bastion: args.bastion(),
    };
    let profile_path = args.install_infra_path.join(plan.topology.profile());
    let vars = ClusterVars {
        scale_version: output.scale_version.clone(),
        cluster_name: output.cluster_name(kind),
        gui_username: args.gui_username.clone(),
        gui_password: args.gui_password.clone(),
        gui_admin_role: settings.gui_admin_role.clone(),
        sync_replication: plan.sync_replication(),
        profile_path: profile_path.to_string_lossy().to_string(),
    };
    let inventory = render_inventory(&plan, &access, &vars);
    write_artifact(&paths.inventory, &inventory)?;

    let group_vars = render_group_vars(&plan, &settings.ephemeral_port_range).handle_err(|e| {
        eprintln!("Could not render cluster configuration: {e}");
    })?;
    write_artifact(&paths.group_vars, &group_vars)?;

    if let Some(address) = plan.gui_address() {
        write_gui_details(&paths.gui_details, kind, address).handle_err(|e| {
            eprintln!(
                "Could not write GUI details \"{}\": {e}",
                paths.gui_details.display()
            );
        })?;
        log::info!("wrote {}", paths.gui_details.display());
    }

    Ok(())
}

fn write_artifact(path: &Path, contents: &str) -> HandledResult<()> {
    std::fs::write(path, contents).handle_err(|e| {
        eprintln!("Could not write \"{}\": {e}", path.display());
    })?;
    log::info!("wrote {}", path.display());
    log::debug!("content of {}:\n{contents}", path.display());
    Ok(())
}
