//! `armory task` command - Task catalogue

use clap::{Subcommand, ValueEnum};
use miette::Result;

use super::utils::{output_list, print_values, show_record, ListOpts, Session};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::GlobalOpts;
use crate::core::index::{CatalogueIndex, Row};
use crate::core::pipeline::apply;
use crate::core::source::SourceError;
use crate::entities::task::{self, RawTask, Task, TaskFilter, TimeSlot};

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks with filtering
    List(ListArgs),

    /// Show a task's full record, including projected fields
    Show(ShowArgs),

    /// List the distinct values of a filterable field
    Values(ValuesArgs),
}

/// Columns to display in list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Key,
    Name,
    Difficulty,
    Map,
    Dlc,
    Item,
    Availability,
    Rank,
    MaxLevel,
    NoBoss,
    Base,
}

impl ListColumn {
    fn key(self) -> &'static str {
        match self {
            ListColumn::Key => "key",
            ListColumn::Name => "name",
            ListColumn::Difficulty => "difficulty",
            ListColumn::Map => "map",
            ListColumn::Dlc => "dlc",
            ListColumn::Item => "item",
            ListColumn::Availability => "availability",
            ListColumn::Rank => "rank",
            ListColumn::MaxLevel => "max-level",
            ListColumn::NoBoss => "no-boss",
            ListColumn::Base => "base",
        }
    }
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

const TASK_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "KEY", 6),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("difficulty", "DIFF", 8),
    ColumnDef::new("map", "MAP", 16),
    ColumnDef::new("dlc", "DLC", 12),
    ColumnDef::new("item", "ITEM", 20),
    ColumnDef::new("availability", "TIME", 24),
    ColumnDef::new("rank", "RANK", 5),
    ColumnDef::new("max-level", "MAX LV", 7),
    ColumnDef::new("no-boss", "NO BOSS", 8),
    ColumnDef::new("base", "BASE", 24),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show this task and the tasks it builds on (exact name)
    #[arg(long)]
    pub name: Option<String>,

    /// Only tasks open in this time window (repeatable; any match passes)
    #[arg(long = "time", value_delimiter = ',')]
    pub times: Vec<TimeSlot>,

    /// Filter by reward item (exact match)
    #[arg(long, short = 'i')]
    pub item: Option<String>,

    /// Filter by map (exact match)
    #[arg(long, short = 'm')]
    pub map: Option<String>,

    /// Filter by DLC (exact match)
    #[arg(long)]
    pub dlc: Option<String>,

    /// Search in name (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Only tasks with a special-variant window
    #[arg(long)]
    pub special: bool,

    /// Only tasks that exclude boss fights
    #[arg(long)]
    pub no_boss: bool,

    /// Columns to display (can specify multiple)
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Key,
        ListColumn::Name,
        ListColumn::Map,
        ListColumn::Item,
        ListColumn::Availability,
        ListColumn::Rank,
        ListColumn::MaxLevel,
        ListColumn::NoBoss
    ])]
    pub columns: Vec<ListColumn>,

    #[command(flatten)]
    pub list: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Task name or row key
    pub target: String,
}

/// Fields with a fixed set of values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ValueField {
    Map,
    Item,
    Dlc,
    Difficulty,
}

#[derive(clap::Args, Debug)]
pub struct ValuesArgs {
    /// Field to list
    pub field: ValueField,
}

/// Load the task catalogue with projected fields attached
pub fn load(session: &Session) -> std::result::Result<CatalogueIndex<Task>, SourceError> {
    session
        .source
        .load_projected::<RawTask, Task>(task::ENDPOINT, task::project)
}

pub fn run(cmd: TaskCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TaskCommands::List(args) => run_list(args, global),
        TaskCommands::Show(args) => {
            let session = Session::open(global);
            show_record(&load(&session)?, &args.target, global)
        }
        TaskCommands::Values(args) => {
            let session = Session::open(global);
            let index = load(&session)?;
            let values = match args.field {
                ValueField::Map => index.distinct(|t| t.raw.map_name.as_deref()),
                ValueField::Item => index.distinct(|t| t.raw.item_name.as_deref()),
                ValueField::Dlc => index.distinct(|t| t.raw.dlc_name.as_deref()),
                ValueField::Difficulty => index.distinct(|t| t.raw.difficulty.as_deref()),
            };
            print_values(&values, global)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let index = load(&session)?;

    let filter = TaskFilter {
        name: args.name,
        times: args.times,
        item: args.item,
        map: args.map,
        dlc: args.dlc,
        search: args.search,
        special: args.special,
        no_boss: args.no_boss,
    };
    let rows = apply(&index, &filter.query());

    let columns: Vec<&str> = args.columns.iter().map(|c| c.key()).collect();
    let formatter = TableFormatter::new(TASK_COLUMNS, "task").with_plural("tasks");
    output_list(rows, &args.list, &columns, formatter, &session, global, task_to_row)
}

fn task_to_row(row: &Row<Task>) -> TableRow {
    let t = &row.record;
    TableRow::new(row.key.clone())
        .cell("key", CellValue::Key(row.key.clone()))
        .cell("name", CellValue::Text(t.raw.name.clone()))
        .cell("difficulty", CellValue::kind(t.raw.difficulty.as_deref()))
        .cell("map", CellValue::text(t.raw.map_name.as_deref()))
        .cell("dlc", CellValue::text(t.raw.dlc_name.as_deref()))
        .cell("item", CellValue::text(t.raw.item_name.as_deref()))
        .cell("availability", CellValue::Text(t.availability.clone()))
        .cell("rank", CellValue::Number(t.rank))
        .cell("max-level", CellValue::Number(t.max_level))
        .cell("no-boss", CellValue::Flag(t.raw.exclude_boss))
        .cell("base", CellValue::text(t.raw.base.as_deref()))
}
