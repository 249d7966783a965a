use clap::Parser;

use crate::command::{Command, GinitCli};

mod command;
mod common;
mod error;
mod new;

fn main() -> anyhow::Result<()> {
    let GinitCli { command } = GinitCli::parse();

    match command {
        Command::New { project_name, dir } => new::new_project(project_name, dir),
    }
}
