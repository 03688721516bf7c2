//! `armory weapon` command - Weapon catalogue

use clap::{Subcommand, ValueEnum};
use miette::Result;

use super::utils::{output_list, print_values, show_record, ListOpts, Session};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::GlobalOpts;
use crate::core::index::Row;
use crate::core::pipeline::apply;
use crate::entities::weapon::{self, Weapon, WeaponFilter};

#[derive(Subcommand, Debug)]
pub enum WeaponCommands {
    /// List weapons with filtering
    List(ListArgs),

    /// Show a weapon's full record
    Show(ShowArgs),

    /// List the distinct values of a filterable field
    Values(ValuesArgs),
}

/// Columns to display in list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Key,
    Name,
    Type,
    Rare,
    Attribute,
    Level,
    Rank,
    PhyAtk,
    MagAtk,
    Crit,
    Skills,
    LeftHand,
    Base,
    Materials,
}

impl ListColumn {
    fn key(self) -> &'static str {
        match self {
            ListColumn::Key => "key",
            ListColumn::Name => "name",
            ListColumn::Type => "type",
            ListColumn::Rare => "rare",
            ListColumn::Attribute => "attribute",
            ListColumn::Level => "level",
            ListColumn::Rank => "rank",
            ListColumn::PhyAtk => "phy-atk",
            ListColumn::MagAtk => "mag-atk",
            ListColumn::Crit => "crit",
            ListColumn::Skills => "skills",
            ListColumn::LeftHand => "left-hand",
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

/// Column definitions for weapon list output
const WEAPON_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "KEY", 6),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("type", "TYPE", 10),
    ColumnDef::new("rare", "RARE", 5),
    ColumnDef::new("attribute", "ATTR", 8),
    ColumnDef::new("level", "LV", 5),
    ColumnDef::new("rank", "RANK", 5),
    ColumnDef::new("phy-atk", "PHY", 7),
    ColumnDef::new("mag-atk", "MAG", 7),
    ColumnDef::new("crit", "CRIT", 6),
    ColumnDef::new("skills", "SKILLS", 30),
    ColumnDef::new("left-hand", "LEFT", 5),
    ColumnDef::new("base", "BASE", 24),
    ColumnDef::new("materials", "MATERIALS", 30),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show the crafting lineage of this weapon (exact name)
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by weapon type (exact match)
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,

    /// Filter by attribute (exact match)
    #[arg(long, short = 'a')]
    pub attribute: Option<String>,

    /// Search in name (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Only rarity grade S
    #[arg(long)]
    pub top_rarity: bool,

    /// Columns to display (can specify multiple)
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Key,
        ListColumn::Name,
        ListColumn::Type,
        ListColumn::Rare,
        ListColumn::Level,
        ListColumn::Rank,
        ListColumn::PhyAtk,
        ListColumn::MagAtk,
        ListColumn::Skills
    ])]
    pub columns: Vec<ListColumn>,

    #[command(flatten)]
    pub list: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Weapon name or row key
    pub target: String,
}

/// Fields with a fixed set of values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ValueField {
    Type,
    Attribute,
    Rare,
}

#[derive(clap::Args, Debug)]
pub struct ValuesArgs {
    /// Field to list
    pub field: ValueField,
}

pub fn run(cmd: WeaponCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        WeaponCommands::List(args) => run_list(args, global),
        WeaponCommands::Show(args) => run_show(args, global),
        WeaponCommands::Values(args) => run_values(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let index = session.source.load::<Weapon>(weapon::ENDPOINT)?;

    let filter = WeaponFilter {
        name: args.name,
        kind: args.kind,
        attribute: args.attribute,
        search: args.search,
        top_rarity: args.top_rarity,
    };
    let rows = apply(&index, &filter.query());

    let columns: Vec<&str> = args.columns.iter().map(|c| c.key()).collect();
    let formatter = TableFormatter::new(WEAPON_COLUMNS, "weapon").with_plural("weapons");
    output_list(rows, &args.list, &columns, formatter, &session, global, weapon_to_row)
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let index = session.source.load::<Weapon>(weapon::ENDPOINT)?;
    show_record(&index, &args.target, global)
}

fn run_values(args: ValuesArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let index = session.source.load::<Weapon>(weapon::ENDPOINT)?;
    let values = match args.field {
        ValueField::Type => index.distinct(|w| w.kind.as_deref()),
        ValueField::Attribute => index.distinct(|w| w.attribute.as_deref()),
        ValueField::Rare => index.distinct(|w| w.rare.as_deref()),
    };
    print_values(&values, global)
}

fn weapon_to_row(row: &Row<Weapon>) -> TableRow {
    let w = &row.record;
    TableRow::new(row.key.clone())
        .cell("key", CellValue::Key(row.key.clone()))
        .cell("name", CellValue::Text(w.name.clone()))
        .cell("type", CellValue::kind(w.kind.as_deref()))
        .cell("rare", CellValue::Rarity(w.rare.clone()))
        .cell("attribute", CellValue::kind(w.attribute.as_deref()))
        .cell("level", CellValue::Number(w.level))
        .cell("rank", CellValue::Number(w.rank))
        .cell("phy-atk", CellValue::Stat(w.phy_atk))
        .cell("mag-atk", CellValue::Stat(w.mag_atk))
        .cell("crit", CellValue::Stat(w.crit))
        .cell("skills", CellValue::Tags(w.skills()))
        .cell("left-hand", CellValue::Flag(w.left_hand))
        .cell("base", CellValue::text(w.base.as_deref()))
        .cell("materials", CellValue::text(w.raw_materials.as_deref()))
}
