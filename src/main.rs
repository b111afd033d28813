//! Lamina - layered configuration composer
//!
//! A command line tool that composes a project configuration from an
//! ordered stack of layers. Layers live in local directories or in
//! version-pinned remote git repositories; composition flattens the
//! stack base-first and emits one immutable effective configuration.

use clap::Parser;

mod cli;
mod commands;
mod compose;
mod effective;
mod error;
mod fragment;
mod merge;
mod overlay;
mod resolver;
mod source;
mod store;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compose(args) => commands::compose::run(cli.dir, args),
        Commands::Layers => commands::layers::run(cli.dir),
        Commands::Env => commands::env::run(cli.dir),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
