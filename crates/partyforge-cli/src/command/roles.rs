use std::io::{self, Write as _};

use anyhow::Context;
use partyforge_evaluator::role::Role;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RolesArg {}

pub(crate) fn run(_arg: &RolesArg) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for role in Role::ALL {
        writeln!(stdout, "{role}").context("Failed to write role list to stdout")?;
    }
    Ok(())
}
