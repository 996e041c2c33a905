// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Parser;

use scaleinv_lib::{
    self,
    commands::{self, Cli},
};

/// The scaleinv binary turns a provisioning run's output into install tooling artifacts.
fn main() {
    let args = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("SCALEINV_LOG", scaleinv_lib::default_log_level(args.verbose)),
    )
    .init();

    if commands::main(&args).is_err() {
        std::process::exit(1);
    }
}
