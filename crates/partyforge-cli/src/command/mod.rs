use clap::{Parser, Subcommand};

use self::{roles::RolesArg, suggest::SuggestArg};

mod roles;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Recommend a team from a catalog of candidate species
    Suggest(#[clap(flatten)] SuggestArg),
    /// List the role names accepted by `role:<name>` objectives and `--role-bias`
    Roles(#[clap(flatten)] RolesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Suggest(arg) => suggest::run(&arg)?,
        Mode::Roles(arg) => roles::run(&arg)?,
    }
    Ok(())
}
