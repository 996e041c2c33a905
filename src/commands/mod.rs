// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod generate;
pub mod plan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{cluster::ClusterPlan, provisioning::ProvisioningOutput, sizing};

use {generate::GenerateArgs, plan::PlanArgs};

/// A `HandledError` represents an error that has already been handled. When you call a function
/// that returns a `HandledError` or `HandledResult`, you don't need to do anything with that error,
/// other than just be aware that it happened, and return it on to your caller.
///
/// `main()` has a special responsibility: since its "caller" is, in a certain sense, the operating
/// system, `main()` must return a nonzero exit status when it gets a `HandledError`.
///
/// The primary way to construct a `HandledError` is with the `handle_err()` function, which turns a
/// generic error into a `HandledError`, and also runs some caller-provided code to handle the
/// error. That provided code would normally do something like report the error to stderr.
#[derive(Debug, PartialEq)]
pub struct HandledError {}

pub type HandledResult<T> = std::result::Result<T, HandledError>;

pub trait Handle<T, F> {
    fn handle_err(self, handler: F) -> HandledResult<T>;
}

impl<T, E, F: FnOnce(E)> Handle<T, F> for std::result::Result<T, E> {
    /// Handle an error by running the provided `handler` code, giving it the error.
    ///
    /// Then, return a `HandledResult`, so that transitive callers of this function know that they
    /// do not need to do anything further to handle the error.
    fn handle_err(self, handler: F) -> HandledResult<T> {
        self.map_err(|e| {
            handler(e);
            HandledError {}
        })
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (defaults to $SCALEINV_CONFIG, then /etc/scaleinv/scaleinv.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log each step and the content of every rendered artifact
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the inventory, cluster configuration, and playbook for a provisioning run
    Generate(GenerateArgs),
    /// Show the roles and layout that would be generated, without writing anything
    Plan(PlanArgs),
}

/// Arguments that decide the cluster plan itself.
#[derive(Args, Debug, Clone)]
pub struct PlanInput {
    /// Provisioning output document (JSON)
    #[arg(long, alias = "tf_inv_path")]
    pub tf_inv_path: PathBuf,

    /// Instance memory size in MiB, used to size the pagepool
    #[arg(long, alias = "memory_size")]
    pub memory_size: u64,

    /// Maximum pagepool size in GB
    #[arg(long, alias = "max_pagepool_gb", default_value_t = sizing::DEFAULT_MAX_POOL_GB)]
    pub max_pagepool_gb: u64,
}

impl PlanInput {
    /// Read the provisioning output and decide the cluster plan for it.
    fn load(&self) -> HandledResult<(ProvisioningOutput, ClusterPlan)> {
        // ProvisioningOutput::from_file reports its own errors.
        let output = ProvisioningOutput::from_file(&self.tf_inv_path).handle_err(|_| {})?;
        log::debug!("parsed provisioning output: {output:?}");

        let plan = ClusterPlan::new(&output, self.memory_size, self.max_pagepool_gb);
        log::info!("identified cluster type: {}", plan.topology);
        log::info!("total node count: {}", plan.total_node_count);
        log::info!("total quorum count: {}", plan.sizing.quorum_count);

        Ok((output, plan))
    }
}

pub fn main(cli: &Cli) -> HandledResult<()> {
    match &cli.command {
        Commands::Generate(args) => generate::generate(cli, args),
        Commands::Plan(args) => plan::plan(args),
    }
}
