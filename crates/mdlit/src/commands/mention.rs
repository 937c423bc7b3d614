//! `mdlit mention` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use mdlit_config::{CliSettings, Config};
use mdlit_renderer::{MentionRenderer, WriterSurface};

use crate::error::CliError;

/// Arguments for the mention command.
#[derive(Args)]
pub(crate) struct MentionArgs {
    /// Target URL; `https://` is added when no scheme is given.
    url: String,

    /// Label to show instead of the resolved one.
    #[arg(short, long)]
    label: Option<String>,

    /// Icon to show: platform keyword, image URL or any text.
    #[arg(short, long, requires = "label")]
    icon: Option<String>,

    /// Never fetch the page to resolve the icon and label.
    #[arg(long)]
    offline: bool,

    /// Path to configuration file (default: auto-discover mdlit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl MentionArgs {
    /// Execute the mention command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or stdout is closed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            network: self.offline.then_some(false),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let options = super::extension_options(&config);

        let spec = self
            .into_mention()
            .into_spec(&options.resolver, &options.mention);

        let mut surface = WriterSurface::new(io::stdout().lock());
        MentionRenderer::write(&spec, &mut surface)?;
        writeln!(surface.into_inner())?;
        Ok(())
    }

    fn into_mention(self) -> mdlit_renderer::MentionArgs {
        match (self.icon, self.label) {
            (Some(icon), Some(label)) => mdlit_renderer::MentionArgs::Full {
                icon,
                label,
                url: self.url,
            },
            (None, Some(label)) => mdlit_renderer::MentionArgs::Labeled {
                label,
                url: self.url,
            },
            // --icon requires --label
            (_, None) => mdlit_renderer::MentionArgs::Url { url: self.url },
        }
    }
}
