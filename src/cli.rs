use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Shell(ShellArgs),
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Base URL of the book resource.
    #[arg(long, default_value = "http://127.0.0.1:5000/book")]
    pub api_url: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Base URL of the book resource.
    #[arg(long, default_value = "http://127.0.0.1:5000/book")]
    pub api_url: String,
}
