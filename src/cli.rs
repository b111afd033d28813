//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lamina - layered configuration composer
///
/// Compose a project configuration from an ordered stack of local and
/// versioned remote layers.
#[derive(Parser, Debug)]
#[command(
    name = "lamina",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Layered configuration composer",
    long_about = "Lamina composes a project configuration from an ordered stack of layers. \
                  Each layer declares a fragment (stylesheets, build options, runtime defaults, \
                  prebundle dependencies) plus the layers it extends; composition flattens the \
                  stack base-first and emits one effective configuration.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  lamina compose\n    \
                  lamina compose --format json\n    \
                  lamina layers -d ./apps/site\n    \
                  lamina env\n    \
                  lamina completions --shell zsh\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/lamina-build/lamina"
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'd', global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose the effective configuration and print it
    Compose(ComposeArgs),

    /// List the resolved layer order without merging
    Layers,

    /// Print public runtime values with environment overrides applied
    Env,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for the compose command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for the compose command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Compose the current project:\n    lamina compose\n\n\
                  Compose as JSON:\n    lamina compose --format json\n\n\
                  Compose another project:\n    lamina compose -d ./apps/site\n\n\
                  Print the content digest instead of the config:\n    lamina compose --digest")]
pub struct ComposeArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Print only the content digest of the effective configuration
    #[arg(long)]
    pub digest: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    lamina completions --shell bash > ~/.bash_completion.d/lamina\n\n\
                  Generate zsh completions:\n    lamina completions --shell zsh > ~/.zfunc/_lamina\n\n\
                  Generate fish completions:\n    lamina completions --shell fish > ~/.config/fish/completions/lamina.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
