//! CLI route: turns parsed flags into settings, runs the comparison, renders
//! the report.

use crate::cli::parse::{Cli, ReportFormat};
use crate::compare::compare;
use crate::config::{CompareConfig, ConfigLoader, Settings};
use crate::error::CompareError;
use crate::fingerprint::AttributeSelection;
use crate::logging::LoggingConfig;
use crate::report::{write_json_report, write_text_report, ReportOptions};
use anyhow::Context;
use std::io::Write;
use tracing::info;

/// Load layered settings and apply command-line overrides.
/// Precedence: CLI flags override environment override files override defaults.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, CompareError> {
    let mut settings = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    apply_attribute_flags(cli, &mut settings.attributes);
    if let Some(workers) = cli.workers {
        settings.workers = workers;
    }
    apply_logging_flags(cli, &mut settings.logging);
    Ok(settings)
}

fn apply_attribute_flags(cli: &Cli, attributes: &mut AttributeSelection) {
    let overrides = [
        (cli.use_mod_time, &mut attributes.mod_time),
        (cli.use_size, &mut attributes.size),
        (cli.use_mode, &mut attributes.mode),
        (cli.use_name, &mut attributes.name),
        (cli.use_path, &mut attributes.path),
    ];
    for (flag, target) in overrides {
        if let Some(value) = flag {
            *target = value;
        }
    }
}

fn apply_logging_flags(cli: &Cli, config: &mut LoggingConfig) {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    if cli.no_color {
        config.color = false;
    }
}

/// Whether report headers get ANSI colour.
///
/// Respects `--no-color`, a non-empty `NO_COLOR`, and whether `out` is a TTY.
fn color_enabled(no_color_flag: bool, terminal: bool, no_color_env: bool) -> bool {
    !no_color_flag && terminal && !no_color_env
}

/// Run the comparison described by `cli` and write the report to `out`.
///
/// `terminal` tells whether `out` is an interactive terminal; colour is only
/// emitted when it is. Nothing is written if scanning fails.
pub fn execute<W: Write>(
    cli: &Cli,
    settings: &Settings,
    out: &mut W,
    terminal: bool,
) -> anyhow::Result<()> {
    if cli.print_config {
        let rendered = toml::to_string_pretty(settings).context("Failed to render settings")?;
        write!(out, "{}", rendered)?;
        return Ok(());
    }

    let config = CompareConfig::from_settings(&cli.dir_a, &cli.dir_b, settings).canonicalized()?;
    let comparison = compare(&config)?;
    info!(identical = comparison.is_identical(), "Comparison finished");

    match cli.format {
        ReportFormat::Text => {
            let options = ReportOptions {
                debug: cli.debug,
                summary: cli.summary,
                color: color_enabled(
                    cli.no_color,
                    terminal,
                    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()),
                ),
            };
            write_text_report(out, &comparison, &options)
        }
        ReportFormat::Json => write_json_report(out, &comparison),
    }
    .context("Failed to write report")
}
