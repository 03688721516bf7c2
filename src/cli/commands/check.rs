//! `armory check` command - Report catalogue consistency problems
//!
//! For each catalogue this loads every row and reports names that occur more
//! than once (only the last one is reachable by name) and `base` tokens that
//! name no record. Neither stops normal use of the catalogue.

use clap::ValueEnum;
use console::style;
use miette::Result;

use super::utils::Session;
use crate::cli::GlobalOpts;
use crate::core::chain::unresolved;
use crate::core::index::CatalogueIndex;
use crate::core::record::Record;
use crate::core::source::SourceError;
use crate::entities::{equipment, item, ring, weapon, Equipment, Item, Ring, Weapon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    Weapon,
    Ring,
    Equip,
    Task,
    Item,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Catalogues to check (default: all)
    #[arg(value_enum)]
    pub kinds: Vec<CheckKind>,

    /// Fail if any duplicate name or unresolved base is found
    #[arg(long)]
    pub strict: bool,

    /// Only print the summary
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Default)]
struct CheckStats {
    catalogues: usize,
    rows: usize,
    missing: usize,
    duplicates: usize,
    unresolved: usize,
}

impl CheckStats {
    fn findings(&self) -> usize {
        self.missing + self.duplicates + self.unresolved
    }
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let kinds = if args.kinds.is_empty() {
        CheckKind::value_variants().to_vec()
    } else {
        args.kinds.clone()
    };

    println!(
        "{} Checking {} catalogue(s) in {}\n",
        style("→").blue(),
        kinds.len(),
        session.source.root().display()
    );

    let mut stats = CheckStats::default();
    for kind in kinds {
        let loaded = match kind {
            CheckKind::Weapon => session
                .source
                .load::<Weapon>(weapon::ENDPOINT)
                .map(|index| check_index(&index, &args, &mut stats)),
            CheckKind::Ring => session
                .source
                .load::<Ring>(ring::ENDPOINT)
                .map(|index| check_index(&index, &args, &mut stats)),
            CheckKind::Equip => session
                .source
                .load::<Equipment>(equipment::ENDPOINT)
                .map(|index| check_index(&index, &args, &mut stats)),
            CheckKind::Task => {
                super::task::load(&session).map(|index| check_index(&index, &args, &mut stats))
            }
            CheckKind::Item => session
                .source
                .load::<Item>(item::ENDPOINT)
                .map(|index| check_index(&index, &args, &mut stats)),
        };

        match loaded {
            Ok(()) => {}
            Err(SourceError::Unavailable { kind, path }) => {
                stats.missing += 1;
                if !args.summary {
                    println!(
                        "{} {} - {} not found",
                        style("?").yellow(),
                        kind,
                        path.display()
                    );
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Check Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Catalogues:      {}", style(stats.catalogues).cyan());
    println!("  Rows:            {}", style(stats.rows).cyan());
    println!("  Duplicate names: {}", style(stats.duplicates).yellow());
    println!("  Unresolved base: {}", style(stats.unresolved).yellow());
    if stats.missing > 0 {
        println!("  Missing files:   {}", style(stats.missing).yellow());
    }
    println!();

    if stats.findings() == 0 {
        println!("{} All catalogues are consistent", style("✓").green().bold());
        return Ok(());
    }

    if args.strict {
        Err(miette::miette!(
            code = "armory::check::failed",
            "Check failed: {} finding(s)",
            stats.findings()
        ))
    } else {
        println!(
            "{} {} finding(s); rerun with --strict to fail on them",
            style("!").yellow(),
            stats.findings()
        );
        Ok(())
    }
}

fn check_index<T: Record>(index: &CatalogueIndex<T>, args: &CheckArgs, stats: &mut CheckStats) {
    let collisions = index.collisions();
    let dangling = unresolved(index);

    stats.catalogues += 1;
    stats.rows += index.len();
    stats.duplicates += collisions.len();
    stats.unresolved += dangling.len();

    if args.summary {
        return;
    }

    if collisions.is_empty() && dangling.is_empty() {
        println!(
            "{} {} - {} row(s)",
            style("✓").green(),
            T::KIND,
            index.len()
        );
        return;
    }

    println!(
        "{} {} - {} row(s)",
        style("!").yellow(),
        T::KIND,
        index.len()
    );
    for c in collisions {
        println!(
            "    {} '{}' at {} shadows {}",
            style("duplicate").yellow(),
            c.name,
            style(&c.kept).cyan(),
            style(&c.dropped).cyan()
        );
    }
    for (key, name, missing) in &dangling {
        println!(
            "    {} {} - {} → '{}'",
            style("unresolved").yellow(),
            style(key).cyan(),
            name,
            missing
        );
    }
}
