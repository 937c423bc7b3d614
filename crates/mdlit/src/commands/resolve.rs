//! `mdlit resolve` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use mdlit_config::{CliSettings, Config};
use mdlit_resolver::{Platform, Resolution, ResolvedLink};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// URL to resolve.
    url: String,

    /// Only use platform rules; never fetch the page.
    #[arg(long)]
    offline: bool,

    /// Path to configuration file (default: auto-discover mdlit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Unresolved`] when nothing could be derived.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            network: self.offline.then_some(false),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let resolver = super::build_resolver(&config.resolver);

        match resolver.resolve(&self.url) {
            Resolution::Resolved(link) => {
                write_link(&mut io::stdout().lock(), &link)?;
                Ok(())
            }
            Resolution::Unresolved => {
                if !resolver.is_online() {
                    output.offline_hint();
                }
                output.fallback(&config.mention.fallback_icon, &config.mention.fallback_label);
                Err(CliError::Unresolved(format!(
                    "no icon or label found for {}",
                    self.url
                )))
            }
        }
    }
}

/// Write `icon` and `label` lines, plus the icon URL for platform keywords.
fn write_link(out: &mut impl Write, link: &ResolvedLink) -> io::Result<()> {
    writeln!(out, "icon: {}", link.icon)?;
    if let Some(platform) = Platform::from_keyword(&link.icon) {
        writeln!(out, "icon_url: {}", platform.icon_url())?;
    }
    writeln!(out, "label: {}", link.label)
}
