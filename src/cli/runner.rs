//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ExporterConfig;
use crate::engine::ExportEngine;
use crate::error::{Result, ResultExt};
use crate::export::ExportOptions;
use serde_json::json;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Channels { output } => self.channels(*output).await,
            Commands::Export {
                channel,
                format,
                sender,
                sort,
                range,
                output,
            } => {
                let options = ExportOptions {
                    format: *format,
                    channel_id: channel.clone().unwrap_or_default(),
                    sender_scope: *sender,
                    sort_order: *sort,
                    time_range: *range,
                };
                self.export(&options, output.as_deref()).await
            }
            Commands::Serve { port } => {
                let config = crate::cli::ServerConfig {
                    exporter: self.load_config()?,
                };
                crate::cli::serve(config, *port).await
            }
        }
    }

    /// Load configuration: file, then environment, then flags
    fn load_config(&self) -> Result<ExporterConfig> {
        let mut config = ExporterConfig::load(self.cli.config.as_deref())?;
        config.apply_overrides(self.cli.api_key.as_deref(), self.cli.base_url.as_deref());
        Ok(config)
    }

    /// Build an engine for one command
    fn engine(&self) -> Result<ExportEngine> {
        ExportEngine::from_config(&self.load_config()?, self.cli.token.clone())
    }

    /// List exportable channels
    async fn channels(&self, output: OutputFormat) -> Result<()> {
        let channels = self.engine()?.list_channels().await?;

        match output {
            OutputFormat::Json => {
                for channel in &channels {
                    println!("{}", serde_json::to_string(channel)?);
                }
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(&channels)?);
            }
        }

        Ok(())
    }

    /// Export one channel to a file
    async fn export(&self, options: &ExportOptions, output: Option<&Path>) -> Result<()> {
        options.validate()?;

        let mut engine = self.engine()?;
        let artifact = engine.export(options).await?;

        let target = output.unwrap_or_else(|| Path::new("."));
        let path = artifact
            .write_to(target)
            .with_context(|| format!("Failed to write {}", target.display()))?;

        println!(
            "{}",
            serde_json::to_string(&json!({
                "type": "EXPORT",
                "path": path.display().to_string(),
                "options": options,
                "effective_sort_order": options.effective_sort_order(),
                "stats": engine.stats(),
            }))?
        );

        Ok(())
    }
}
