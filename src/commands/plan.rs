// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::commands::{HandledResult, PlanInput};

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: PlanInput,
}

pub fn plan(args: &PlanArgs) -> HandledResult<()> {
    let (_, plan) = args.input.load()?;

    plan.print_summary();

    Ok(())
}
