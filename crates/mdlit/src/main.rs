//! mdlit CLI - Markdown with colored spans, link mentions and glyphs.
//!
//! Provides commands for:
//! - `render`: Render a Markdown file (or stdin) to HTML
//! - `mention`: Write a single link mention as HTML
//! - `resolve`: Show the icon and label derived for a URL

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MentionArgs, RenderArgs, ResolveArgs};
use output::Output;

/// mdlit - Markdown with colored spans, link mentions and glyphs.
#[derive(Parser)]
#[command(name = "mdlit", version, about)]
struct Cli {
    /// Enable verbose output (resolver and preprocessor logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown to HTML.
    Render(RenderArgs),
    /// Render a single link mention.
    Mention(MentionArgs),
    /// Show the icon and label derived for a URL.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Mention(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["mdlit", "render", "doc.md", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["mdlit"]).is_err());
    }
}
