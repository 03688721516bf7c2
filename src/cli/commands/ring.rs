//! `armory ring` command - Ring catalogue

use clap::{Subcommand, ValueEnum};
use miette::Result;

use super::utils::{output_list, print_values, show_record, ListOpts, Session};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::GlobalOpts;
use crate::core::index::Row;
use crate::core::pipeline::apply;
use crate::entities::ring::{self, Ring, RingFilter};

#[derive(Subcommand, Debug)]
pub enum RingCommands {
    /// List rings with filtering
    List(ListArgs),

    /// Show a ring's full record
    Show(ShowArgs),

    /// List the distinct values of a filterable field
    Values(ValuesArgs),
}

/// Columns to display in list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Key,
    Name,
    Rare,
    Level,
    Rank,
    PhyAtk,
    MagAtk,
    Crit,
    Skills,
    Base,
    Materials,
}

impl ListColumn {
    fn key(self) -> &'static str {
        match self {
            ListColumn::Key => "key",
            ListColumn::Name => "name",
            ListColumn::Rare => "rare",
            ListColumn::Level => "level",
            ListColumn::Rank => "rank",
            ListColumn::PhyAtk => "phy-atk",
            ListColumn::MagAtk => "mag-atk",
            ListColumn::Crit => "crit",
            ListColumn::Skills => "skills",
            ListColumn::Base => "base",
            ListColumn::Materials => "materials",
        }
    }
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

const RING_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "KEY", 6),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("rare", "RARE", 5),
    ColumnDef::new("level", "LV", 5),
    ColumnDef::new("rank", "RANK", 5),
    ColumnDef::new("phy-atk", "PHY", 7),
    ColumnDef::new("mag-atk", "MAG", 7),
    ColumnDef::new("crit", "CRIT", 6),
    ColumnDef::new("skills", "SKILLS", 36),
    ColumnDef::new("base", "BASE", 24),
    ColumnDef::new("materials", "MATERIALS", 30),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show the crafting lineage of this ring (exact name)
    #[arg(long)]
    pub name: Option<String>,

    /// Search in name (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Only rarity grade A or better
    #[arg(long)]
    pub rarity_a: bool,

    /// Only rings with a multi-hit (複) skill
    #[arg(long)]
    pub multi: bool,

    /// Columns to display (can specify multiple)
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Key,
        ListColumn::Name,
        ListColumn::Rare,
        ListColumn::Level,
        ListColumn::Rank,
        ListColumn::Skills
    ])]
    pub columns: Vec<ListColumn>,

    #[command(flatten)]
    pub list: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Ring name or row key
    pub target: String,
}

/// Fields with a fixed set of values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ValueField {
    Rare,
}

#[derive(clap::Args, Debug)]
pub struct ValuesArgs {
    /// Field to list
    pub field: ValueField,
}

pub fn run(cmd: RingCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RingCommands::List(args) => run_list(args, global),
        RingCommands::Show(args) => {
            let session = Session::open(global);
            let index = session.source.load::<Ring>(ring::ENDPOINT)?;
            show_record(&index, &args.target, global)
        }
        RingCommands::Values(args) => {
            let session = Session::open(global);
            let index = session.source.load::<Ring>(ring::ENDPOINT)?;
            let values = match args.field {
                ValueField::Rare => index.distinct(|r| r.rare.as_deref()),
            };
            print_values(&values, global)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let index = session.source.load::<Ring>(ring::ENDPOINT)?;

    let filter = RingFilter {
        name: args.name,
        search: args.search,
        rarity_a: args.rarity_a,
        multi: args.multi,
    };
    let rows = apply(&index, &filter.query());

    let columns: Vec<&str> = args.columns.iter().map(|c| c.key()).collect();
    let formatter = TableFormatter::new(RING_COLUMNS, "ring").with_plural("rings");
    output_list(rows, &args.list, &columns, formatter, &session, global, ring_to_row)
}

fn ring_to_row(row: &Row<Ring>) -> TableRow {
    let r = &row.record;
    TableRow::new(row.key.clone())
        .cell("key", CellValue::Key(row.key.clone()))
        .cell("name", CellValue::Text(r.name.clone()))
        .cell("rare", CellValue::Rarity(r.rare.clone()))
        .cell("level", CellValue::Number(r.level))
        .cell("rank", CellValue::Number(r.rank))
        .cell("phy-atk", CellValue::Stat(r.phy_atk))
        .cell("mag-atk", CellValue::Stat(r.mag_atk))
        .cell("crit", CellValue::Stat(r.crit))
        .cell("skills", CellValue::Tags(r.skills()))
        .cell("base", CellValue::text(r.base.as_deref()))
        .cell("materials", CellValue::text(r.raw_materials.as_deref()))
}
