use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Scaffold a Go web project wired for Gin and GORM")]
pub struct GinitCli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    New {
        /// Name of the project; becomes the directory name, the Go module
        /// path and the database name prefix
        #[arg(value_name = "PROJECT_NAME", index = 1)]
        project_name: Option<String>,
        /// Directory to create the project at, defaults to ./<PROJECT_NAME>
        #[arg(short = 'd', long)]
        dir: Option<String>,
    },
}
