//! `armory equip` command - Equipment catalogue

use clap::{Subcommand, ValueEnum};
use miette::Result;

use super::utils::{output_list, print_values, show_record, ListOpts, Session};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::GlobalOpts;
use crate::core::index::Row;
use crate::core::pipeline::apply;
use crate::entities::equipment::{self, Equipment, EquipmentFilter};

#[derive(Subcommand, Debug)]
pub enum EquipCommands {
    /// List equipment with filtering
    List(ListArgs),

    /// Show an equipment piece's full record
    Show(ShowArgs),

    /// List the distinct values of a filterable field
    Values(ValuesArgs),
}

/// Columns to display in list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Key,
    Name,
    Part,
    Type,
    Pro,
    Rare,
    Level,
    Rank,
    PhyDef,
    MagDef,
    Inscription,
    Base,
    Materials,
    Notice,
}

impl ListColumn {
    fn key(self) -> &'static str {
        match self {
            ListColumn::Key => "key",
            ListColumn::Name => "name",
            ListColumn::Part => "part",
            ListColumn::Type => "type",
            ListColumn::Pro => "pro",
            ListColumn::Rare => "rare",
            ListColumn::Level => "level",
            ListColumn::Rank => "rank",
            ListColumn::PhyDef => "phy-def",
            ListColumn::MagDef => "mag-def",
            ListColumn::Inscription => "inscription",
            ListColumn::Base => "base",
            ListColumn::Materials => "materials",
            ListColumn::Notice => "notice",
        }
    }
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

const EQUIPMENT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "KEY", 6),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("part", "PART", 8),
    ColumnDef::new("type", "TYPE", 10),
    ColumnDef::new("pro", "PRO", 10),
    ColumnDef::new("rare", "RARE", 5),
    ColumnDef::new("level", "LV", 5),
    ColumnDef::new("rank", "RANK", 5),
    ColumnDef::new("phy-def", "PHY", 7),
    ColumnDef::new("mag-def", "MAG", 7),
    ColumnDef::new("inscription", "INSCRIPTION", 30),
    ColumnDef::new("base", "BASE", 24),
    ColumnDef::new("materials", "MATERIALS", 30),
    ColumnDef::new("notice", "NOTICE", 30),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show the crafting lineage of this piece (exact name)
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by body part (exact match)
    #[arg(long, short = 'p')]
    pub part: Option<String>,

    /// Filter by type (exact match)
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,

    /// Filter by profession (exact match)
    #[arg(long)]
    pub pro: Option<String>,

    /// Search in name (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Only rarity grade A or better
    #[arg(long)]
    pub rarity_a: bool,

    /// Only pieces whose inscription adds a chase or extra strike (追撃/加撃)
    #[arg(long)]
    pub chase: bool,

    /// Columns to display (can specify multiple)
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Key,
        ListColumn::Name,
        ListColumn::Part,
        ListColumn::Rare,
        ListColumn::Level,
        ListColumn::Rank,
        ListColumn::PhyDef,
        ListColumn::MagDef,
        ListColumn::Inscription
    ])]
    pub columns: Vec<ListColumn>,

    #[command(flatten)]
    pub list: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Equipment name or row key
    pub target: String,
}

/// Fields with a fixed set of values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ValueField {
    Part,
    Type,
    Pro,
    Rare,
}

#[derive(clap::Args, Debug)]
pub struct ValuesArgs {
    /// Field to list
    pub field: ValueField,
}

pub fn run(cmd: EquipCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EquipCommands::List(args) => run_list(args, global),
        EquipCommands::Show(args) => {
            let session = Session::open(global);
            let index = session.source.load::<Equipment>(equipment::ENDPOINT)?;
            show_record(&index, &args.target, global)
        }
        EquipCommands::Values(args) => {
            let session = Session::open(global);
            let index = session.source.load::<Equipment>(equipment::ENDPOINT)?;
            let values = match args.field {
                ValueField::Part => index.distinct(|e| e.part.as_deref()),
                ValueField::Type => index.distinct(|e| e.kind.as_deref()),
                ValueField::Pro => index.distinct(|e| e.pro.as_deref()),
                ValueField::Rare => index.distinct(|e| e.rare.as_deref()),
            };
            print_values(&values, global)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let index = session.source.load::<Equipment>(equipment::ENDPOINT)?;

    let filter = EquipmentFilter {
        name: args.name,
        part: args.part,
        kind: args.kind,
        pro: args.pro,
        search: args.search,
        rarity_a: args.rarity_a,
        chase: args.chase,
    };
    let rows = apply(&index, &filter.query());

    let columns: Vec<&str> = args.columns.iter().map(|c| c.key()).collect();
    let formatter = TableFormatter::new(EQUIPMENT_COLUMNS, "equipment").with_plural("equipment");
    output_list(rows, &args.list, &columns, formatter, &session, global, equipment_to_row)
}

fn equipment_to_row(row: &Row<Equipment>) -> TableRow {
    let e = &row.record;
    TableRow::new(row.key.clone())
        .cell("key", CellValue::Key(row.key.clone()))
        .cell("name", CellValue::Text(e.name.clone()))
        .cell("part", CellValue::kind(e.part.as_deref()))
        .cell("type", CellValue::kind(e.kind.as_deref()))
        .cell("pro", CellValue::kind(e.pro.as_deref()))
        .cell("rare", CellValue::Rarity(e.rare.clone()))
        .cell("level", CellValue::Number(e.level))
        .cell("rank", CellValue::Number(e.rank))
        .cell("phy-def", CellValue::Stat(e.phy_def))
        .cell("mag-def", CellValue::Stat(e.mag_def))
        .cell("inscription", CellValue::text(e.inscription.as_deref()))
        .cell("base", CellValue::text(e.base.as_deref()))
        .cell("materials", CellValue::text(e.raw_materials.as_deref()))
        .cell("notice", CellValue::text(e.notice.as_deref()))
}
