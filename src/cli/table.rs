//! Table formatting utilities for CLI list commands
//!
//! Every list command builds [`TableRow`]s out of typed [`CellValue`]s and
//! hands them to a [`TableFormatter`], which renders TSV, CSV, Markdown or bare
//! row keys.
//!
//! # Text Wrapping
//!
//! The table formatter supports text wrapping for narrow terminals:
//! - Use `TableConfig::with_wrap(width)` to enable word-wrapped multi-line rows
//! - CSV and ID formats remain single-line for pipability
//! - TSV supports wrapped output

use console::{measure_text_width, style};

use crate::cli::helpers::{escape_csv, pad_left, pad_right, truncate_str};
use crate::cli::OutputFormat;
use crate::core::record::Grade;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Maximum width for text columns before wrapping (None = truncate instead)
    pub wrap_width: Option<usize>,
    /// Show summary line after table (e.g., "5 weapon(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            wrap_width: None,
            show_summary: true,
        }
    }
}

impl TableConfig {
    /// Create config with text wrapping enabled at the specified width
    pub fn with_wrap(width: usize) -> Self {
        Self {
            wrap_width: Some(width),
            show_summary: true,
        }
    }

    /// Create config optimized for piping (no wrapping, no summary)
    pub fn for_pipe() -> Self {
        Self {
            wrap_width: None,
            show_summary: false,
        }
    }
}

/// Wrap text to fit within a maximum display width, breaking at word boundaries.
///
/// Runs without spaces (most Japanese text) are broken between characters.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    // Don't wrap if text already fits or width is too small to be useful
    if measure_text_width(text) <= max_width || max_width < 5 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let word_width = measure_text_width(word);
        let needed = if current_line.is_empty() {
            word_width
        } else {
            measure_text_width(&current_line) + 1 + word_width
        };

        if needed <= max_width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
            continue;
        }

        if !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
        }

        if word_width <= max_width {
            current_line = word.to_string();
            continue;
        }

        // Word is longer than max width, force break
        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let ch_width = measure_text_width(ch.encode_utf8(&mut buf));
            if !current_line.is_empty() && measure_text_width(&current_line) + ch_width > max_width {
                lines.push(std::mem::take(&mut current_line));
            }
            current_line.push(ch);
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Row key (cyan)
    Key(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Rarity code, colored by grade
    Rarity(Option<String>),
    /// Category or type code
    Type(String),
    /// Integer stat (level, rank, price)
    Number(Option<i64>),
    /// Real-valued stat (attack, defense)
    Stat(Option<f64>),
    /// Yes/no flag (yes=green, no=dim)
    Flag(bool),
    /// Tags/labels as comma-separated
    Tags(Vec<String>),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Text cell from an optional field, empty when absent
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) => CellValue::Text(s.to_string()),
            None => CellValue::Empty,
        }
    }

    /// Type cell from an optional field, empty when absent
    pub fn kind(value: Option<&str>) -> Self {
        match value {
            Some(s) => CellValue::Type(s.to_string()),
            None => CellValue::Empty,
        }
    }

    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Key(key) => pad_left(&style(key).cyan().to_string(), width),
            CellValue::Text(s) | CellValue::Type(s) => {
                pad_left(&truncate_str(s, width.saturating_sub(2)), width)
            }
            CellValue::Rarity(Some(code)) => {
                let styled = match Grade::of(code) {
                    Some(Grade::S) => style(code).yellow().bold(),
                    Some(Grade::A) => style(code).magenta(),
                    Some(Grade::B) => style(code).cyan(),
                    _ => style(code).white(),
                };
                pad_left(&styled.to_string(), width)
            }
            CellValue::Number(Some(n)) => pad_right(&n.to_string(), width),
            CellValue::Stat(Some(x)) => pad_right(&x.to_string(), width),
            CellValue::Flag(flag) => {
                let styled = if *flag {
                    style("yes").green()
                } else {
                    style("no").dim()
                };
                pad_left(&styled.to_string(), width)
            }
            CellValue::Tags(tags) => {
                let joined = tags.join(", ");
                pad_left(&truncate_str(&joined, width.saturating_sub(2)), width)
            }
            CellValue::Rarity(None) | CellValue::Number(None) | CellValue::Stat(None) | CellValue::Empty => {
                pad_left(&style("-").dim().to_string(), width)
            }
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        escape_csv(&self.raw())
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Rarity(None) | CellValue::Number(None) | CellValue::Stat(None) | CellValue::Empty => {
                "-".to_string()
            }
            CellValue::Flag(true) => "**yes**".to_string(),
            other => other.raw(),
        };
        // Escape pipe characters for markdown tables
        raw.replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Key(s) | CellValue::Text(s) | CellValue::Type(s) => s.clone(),
            CellValue::Rarity(code) => code.clone().unwrap_or_default(),
            CellValue::Number(n) => n.map(|n| n.to_string()).unwrap_or_default(),
            CellValue::Stat(x) => x.map(|x| x.to_string()).unwrap_or_default(),
            CellValue::Flag(flag) => crate::core::flag::yes_no(*flag).to_string(),
            CellValue::Tags(tags) => tags.join(", "),
            CellValue::Empty => String::new(),
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Flag(_) => 3,
            other => measure_text_width(&other.raw()).max(1),
        }
    }
}

/// Column definition with header label and width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub key: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    entity_name_plural: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            entity_name_plural: entity_name,
            config: TableConfig::default(),
        }
    }

    /// Set a custom plural name (e.g., "equipment" instead of "equipment(s)")
    pub fn with_plural(mut self, plural: &'static str) -> Self {
        self.entity_name_plural = plural;
        self
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    pub fn entity_name_plural(&self) -> &'static str {
        self.entity_name_plural
    }

    /// Output rows in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat, visible_columns: &[&str])
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();

        match format {
            OutputFormat::Csv => self.output_csv(&rows, visible_columns),
            OutputFormat::Md => self.output_md(&rows, visible_columns),
            OutputFormat::Id => self.output_ids(&rows),
            _ => self.output_tsv(&rows, visible_columns),
        }
    }

    fn visible<'c>(&'c self, visible_columns: &'c [&str]) -> impl Iterator<Item = &'c ColumnDef> + 'c {
        self.columns
            .iter()
            .filter(move |col| visible_columns.contains(&col.key))
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow], visible_columns: &[&str]) -> Vec<usize> {
        self.visible(visible_columns)
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);

                // +2 for the truncation buffer, capped at the declared width
                let natural_width = measure_text_width(col.header).max(max_content.saturating_add(2));
                natural_width.min(col.width.max(measure_text_width(col.header)))
            })
            .collect()
    }

    fn output_tsv(&self, rows: &[TableRow], visible_columns: &[&str]) {
        let widths = self.calculate_widths(rows, visible_columns);

        let header: Vec<String> = self
            .visible(visible_columns)
            .zip(&widths)
            .map(|(col, w)| pad_left(&style(col.header).bold().to_string(), *w))
            .collect();
        println!("{}", header.join(" ").trim_end());

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total_width));

        for row in rows {
            match self.config.wrap_width {
                Some(wrap_width) => self.output_tsv_row_wrapped(row, visible_columns, &widths, wrap_width),
                None => self.output_tsv_row_truncated(row, visible_columns, &widths),
            }
        }

        // Summary (unless disabled for piping)
        if self.config.show_summary {
            println!();
            println!("{} {}(s) found.", style(rows.len()).cyan(), self.entity_name);
        }
    }

    fn output_tsv_row_truncated(&self, row: &TableRow, visible_columns: &[&str], widths: &[usize]) {
        let parts: Vec<String> = self
            .visible(visible_columns)
            .zip(widths)
            .map(|(col, w)| match row.get(col.key) {
                Some(value) => value.format_tsv(*w),
                None => CellValue::Empty.format_tsv(*w),
            })
            .collect();
        println!("{}", parts.join(" ").trim_end());
    }

    fn output_tsv_row_wrapped(&self, row: &TableRow, visible_columns: &[&str], widths: &[usize], wrap_width: usize) {
        // Only Text and Tags columns wrap; everything else renders on the first line
        let cells: Vec<(Option<CellValue>, Vec<String>)> = self
            .visible(visible_columns)
            .map(|col| match row.get(col.key) {
                Some(value @ (CellValue::Text(_) | CellValue::Tags(_))) => {
                    (None, wrap_text(&value.raw(), wrap_width))
                }
                Some(value) => (Some(value.clone()), Vec::new()),
                None => (Some(CellValue::Empty), Vec::new()),
            })
            .collect();

        let max_lines = cells.iter().map(|(_, lines)| lines.len()).max().unwrap_or(1).max(1);

        for line_idx in 0..max_lines {
            let parts: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|((fixed, lines), w)| match fixed {
                    Some(value) if line_idx == 0 => value.format_tsv(*w),
                    Some(_) => pad_left("", *w),
                    None => pad_left(lines.get(line_idx).map(String::as_str).unwrap_or(""), *w),
                })
                .collect();
            println!("{}", parts.join(" ").trim_end());
        }

        // Add blank line between multi-line rows for readability
        if max_lines > 1 {
            println!();
        }
    }

    fn output_csv(&self, rows: &[TableRow], visible_columns: &[&str]) {
        let headers: Vec<&str> = self.visible(visible_columns).map(|col| col.key).collect();
        println!("{}", headers.join(","));

        for row in rows {
            let values: Vec<String> = self
                .visible(visible_columns)
                .map(|col| row.get(col.key).map(CellValue::format_csv).unwrap_or_default())
                .collect();
            println!("{}", values.join(","));
        }
    }

    fn output_md(&self, rows: &[TableRow], visible_columns: &[&str]) {
        let headers: Vec<&str> = self.visible(visible_columns).map(|col| col.header).collect();
        println!("| {} |", headers.join(" | "));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        for row in rows {
            let values: Vec<String> = self
                .visible(visible_columns)
                .map(|col| {
                    row.get(col.key)
                        .map(CellValue::format_md)
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            println!("| {} |", values.join(" | "));
        }
    }

    fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.key);
        }
    }
}
