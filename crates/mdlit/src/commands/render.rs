//! `mdlit render` command implementation.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Args;
use mdlit_config::{CliSettings, Config};
use mdlit_renderer::{ExtensionName, WriterSurface, render_markdown};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: read stdin).
    file: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdlit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extension to enable; repeat for several (overrides config).
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Never fetch pages to resolve mention icons.
    #[arg(long)]
    offline: bool,

    /// Network timeout in seconds (overrides config).
    #[arg(long, env = "MDLIT_TIMEOUT")]
    timeout: Option<u64>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, an extension name is
    /// unknown, or input/output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let extensions = parse_extensions(&config.render.extensions)?;
        let options = super::extension_options(&config);

        let text = self.read_input()?;
        tracing::info!(
            extensions = ?config.render.extensions,
            online = options.resolver.is_online(),
            bytes = text.len(),
            "Rendering"
        );

        if let Some(path) = &self.output {
            let mut surface = WriterSurface::new(BufWriter::new(File::create(path)?));
            render_markdown(&text, &extensions, &options, &mut surface)?;
            surface.into_inner().flush()?;
            output.wrote(path);
        } else {
            let mut surface = WriterSurface::new(io::stdout().lock());
            render_markdown(&text, &extensions, &options, &mut surface)?;
        }

        let cached = options.resolver.cache().len();
        if cached > 0 {
            tracing::info!(cached, "Resolved mention URLs");
        }
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            extensions: (!self.extensions.is_empty()).then(|| self.extensions.clone()),
            network: self.offline.then_some(false),
            timeout_secs: self.timeout,
        }
    }

    fn read_input(&self) -> Result<String, CliError> {
        match &self.file {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// Parse configured names, rejecting unknown ones.
fn parse_extensions(names: &[String]) -> Result<Vec<ExtensionName>, CliError> {
    names
        .iter()
        .map(|name| name.parse::<ExtensionName>().map_err(CliError::from))
        .collect()
}
