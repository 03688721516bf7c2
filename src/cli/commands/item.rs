//! `armory item` command - Item catalogue

use clap::{Subcommand, ValueEnum};
use miette::Result;

use super::utils::{output_list, print_values, show_record, ListOpts, Session};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::GlobalOpts;
use crate::core::index::Row;
use crate::core::pipeline::apply;
use crate::entities::item::{self, Item, ItemFilter};

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items with filtering (catalogue order)
    List(ListArgs),

    /// Show an item's full record
    Show(ShowArgs),

    /// List the distinct values of a filterable field
    Values(ValuesArgs),
}

/// Columns to display in list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Key,
    Name,
    Dlc,
    Copper,
    Silver,
    Gold,
    Shadow,
    Huang,
    Normal,
    Coin,
    Notice,
}

impl ListColumn {
    fn key(self) -> &'static str {
        match self {
            ListColumn::Key => "key",
            ListColumn::Name => "name",
            ListColumn::Dlc => "dlc",
            ListColumn::Copper => "copper",
            ListColumn::Silver => "silver",
            ListColumn::Gold => "gold",
            ListColumn::Shadow => "shadow",
            ListColumn::Huang => "huang",
            ListColumn::Normal => "normal",
            ListColumn::Coin => "coin",
            ListColumn::Notice => "notice",
        }
    }
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

const ITEM_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "KEY", 6),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("dlc", "DLC", 12),
    ColumnDef::new("copper", "COPPER", 8),
    ColumnDef::new("silver", "SILVER", 8),
    ColumnDef::new("gold", "GOLD", 8),
    ColumnDef::new("shadow", "SHADOW", 8),
    ColumnDef::new("huang", "HUANG", 8),
    ColumnDef::new("normal", "NORMAL", 8),
    ColumnDef::new("coin", "COIN", 10),
    ColumnDef::new("notice", "NOTICE", 30),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by coin type (exact match)
    #[arg(long, short = 'c')]
    pub coin: Option<String>,

    /// Search in name (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Columns to display (can specify multiple)
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Key,
        ListColumn::Name,
        ListColumn::Dlc,
        ListColumn::Copper,
        ListColumn::Silver,
        ListColumn::Gold,
        ListColumn::Coin
    ])]
    pub columns: Vec<ListColumn>,

    #[command(flatten)]
    pub list: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Item name or row key
    pub target: String,
}

/// Fields with a fixed set of values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ValueField {
    Coin,
    Dlc,
}

#[derive(clap::Args, Debug)]
pub struct ValuesArgs {
    /// Field to list
    pub field: ValueField,
}

pub fn run(cmd: ItemCommands, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let index = session.source.load::<Item>(item::ENDPOINT)?;

    match cmd {
        ItemCommands::List(args) => {
            let filter = ItemFilter {
                coin: args.coin,
                search: args.search,
            };
            let rows = apply(&index, &filter.query());

            let columns: Vec<&str> = args.columns.iter().map(|c| c.key()).collect();
            let formatter = TableFormatter::new(ITEM_COLUMNS, "item").with_plural("items");
            output_list(rows, &args.list, &columns, formatter, &session, global, item_to_row)
        }
        ItemCommands::Show(args) => show_record(&index, &args.target, global),
        ItemCommands::Values(args) => {
            let values = match args.field {
                ValueField::Coin => index.distinct(|i| i.coin_type.as_deref()),
                ValueField::Dlc => index.distinct(|i| i.dlc_name.as_deref()),
            };
            print_values(&values, global)
        }
    }
}

fn item_to_row(row: &Row<Item>) -> TableRow {
    let i = &row.record;
    TableRow::new(row.key.clone())
        .cell("key", CellValue::Key(row.key.clone()))
        .cell("name", CellValue::Text(i.name.clone()))
        .cell("dlc", CellValue::text(i.dlc_name.as_deref()))
        .cell("copper", CellValue::Number(i.copper))
        .cell("silver", CellValue::Number(i.silver))
        .cell("gold", CellValue::Number(i.gold))
        .cell("shadow", CellValue::Number(i.shadow))
        .cell("huang", CellValue::Number(i.huang))
        .cell("normal", CellValue::Number(i.normal))
        .cell("coin", CellValue::kind(i.coin_type.as_deref()))
        .cell("notice", CellValue::text(i.notice.as_deref()))
}
