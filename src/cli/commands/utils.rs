//! Shared utilities for CLI commands

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::table::{TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::index::{CatalogueIndex, Row};
use crate::core::record::Record;
use crate::core::{CatalogueSource, Config};

/// Loaded configuration plus the catalogue source it points at
pub struct Session {
    pub config: Config,
    pub source: CatalogueSource,
}

impl Session {
    pub fn open(global: &GlobalOpts) -> Self {
        let config = Config::load();
        let source = CatalogueSource::new(config.data_dir(global.data_dir.as_deref()));
        tracing::debug!(data_dir = %source.root().display(), "using catalogue directory");
        Self { config, source }
    }

    /// Format for list output: explicit flag, then configured default, then TSV
    pub fn list_format(&self, global: &GlobalOpts) -> OutputFormat {
        if global.format != OutputFormat::Auto {
            return global.format;
        }
        match self.config.default_format.as_deref() {
            Some(name) => match OutputFormat::from_str(name, true) {
                Ok(OutputFormat::Auto) => OutputFormat::Tsv,
                Ok(format) => format,
                Err(_) => {
                    tracing::warn!(format = name, "ignoring unknown default_format");
                    OutputFormat::Tsv
                }
            },
            None => OutputFormat::Tsv,
        }
    }
}

/// Options shared by every `list` subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListOpts {
    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Wrap text in columns (narrow-terminal output with specified width)
    #[arg(long, short = 'w')]
    pub wrap: Option<usize>,
}

/// Print the rows produced by a list query in the selected format
pub fn output_list<T, F>(
    mut rows: Vec<&Row<T>>,
    opts: &ListOpts,
    visible_columns: &[&str],
    formatter: TableFormatter<'_>,
    session: &Session,
    global: &GlobalOpts,
    to_row: F,
) -> Result<()>
where
    T: Serialize,
    F: Fn(&Row<T>) -> TableRow,
{
    if opts.reverse {
        rows.reverse();
    }

    if let Some(limit) = opts.limit.or(session.config.limit) {
        rows.truncate(limit);
    }

    // Count only
    if opts.count {
        println!("{}", rows.len());
        return Ok(());
    }

    // No results
    if rows.is_empty() {
        if !global.quiet {
            println!("No {} found.", formatter.entity_name_plural());
        }
        return Ok(());
    }

    match session.list_format(global) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&rows).into_diagnostic()?;
            print!("{}", yaml);
        }
        format => {
            let config = TableConfig {
                wrap_width: opts.wrap.or(session.config.wrap_width),
                show_summary: !global.quiet,
            };
            formatter
                .with_config(config)
                .output(rows.iter().map(|row| to_row(row)), format, visible_columns);
        }
    }

    Ok(())
}

/// Print one record, looked up by name first and then by row key
pub fn show_record<T>(index: &CatalogueIndex<T>, target: &str, global: &GlobalOpts) -> Result<()>
where
    T: Record + Serialize,
{
    let row = index
        .get(target)
        .or_else(|| index.get_by_key(target))
        .ok_or_else(|| {
            miette::miette!(
                code = "armory::show::not_found",
                help = "Names are matched exactly; use `list --search` for a partial match",
                "No {} named or keyed '{}'",
                T::KIND,
                target
            )
        })?;

    let shared = index.named(target).count();
    if shared > 1 && !global.quiet {
        eprintln!(
            "{} {} rows are named '{}'; showing the last one (key {})",
            style("!").yellow(),
            shared,
            target,
            row.key
        );
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(row).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(row).into_diagnostic()?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

/// Print the distinct values of a field, one per line
pub fn print_values(values: &[String], global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(values).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(values).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            for value in values {
                println!("{}", value);
            }
        }
    }
    Ok(())
}
