//! `armory chain` command - Print a record's crafting lineage as a tree

use clap::ValueEnum;
use console::style;
use miette::Result;

use super::utils::Session;
use crate::cli::helpers::truncate_str;
use crate::cli::GlobalOpts;
use crate::core::chain::{lineage, trace, BaseRef};
use crate::core::index::CatalogueIndex;
use crate::core::record::Record;
use crate::entities::{equipment, ring, weapon, Equipment, Ring, Weapon};

/// Catalogues that carry crafting chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChainKind {
    Weapon,
    Ring,
    Equip,
    Task,
}

#[derive(clap::Args, Debug)]
pub struct ChainArgs {
    /// Catalogue to look in
    #[arg(value_enum)]
    pub kind: ChainKind,

    /// Record name (exact match)
    pub name: String,

    /// Maximum depth to print
    #[arg(long, short = 'd')]
    pub depth: Option<usize>,
}

pub fn run(args: ChainArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    match args.kind {
        ChainKind::Weapon => {
            let index = session.source.load::<Weapon>(weapon::ENDPOINT)?;
            print_chain(&index, &args, global)
        }
        ChainKind::Ring => {
            let index = session.source.load::<Ring>(ring::ENDPOINT)?;
            print_chain(&index, &args, global)
        }
        ChainKind::Equip => {
            let index = session.source.load::<Equipment>(equipment::ENDPOINT)?;
            print_chain(&index, &args, global)
        }
        ChainKind::Task => {
            let index = super::task::load(&session)?;
            print_chain(&index, &args, global)
        }
    }
}

fn print_chain<T: Record>(index: &CatalogueIndex<T>, args: &ChainArgs, global: &GlobalOpts) -> Result<()> {
    let root = index.get(&args.name).ok_or_else(|| {
        miette::miette!(
            code = "armory::chain::not_found",
            help = format!("Use `armory {} list --search` to find the exact name", cli_name(args.kind)),
            "No {} named '{}'",
            T::KIND,
            args.name
        )
    })?;

    let steps = trace(&root.record, index, args.depth);

    if global.quiet {
        for step in steps.iter().filter(|s| !s.cycle && !s.repeat) {
            println!("{}", step.name);
        }
        return Ok(());
    }

    println!(
        "{} Crafting lineage of: {} - {}",
        style("→").blue(),
        style(&root.key).cyan(),
        root.record.name()
    );
    match BaseRef::parse(root.record.base()) {
        BaseRef::Origin => println!("  {}", style("(origin)").dim()),
        BaseRef::Composite => println!("  {}", style("(composite)").dim()),
        BaseRef::Missing => println!("  {}", style("(no base)").dim()),
        BaseRef::Sources(_) => {}
    }
    println!();

    for step in &steps {
        let indent = "  ".repeat(step.depth);
        let name = truncate_str(&step.name, 40);
        match &step.key {
            Some(key) if step.cycle => {
                println!("{}← {} - {} {}", indent, style(key).cyan(), name, style("(cycle)").red())
            }
            Some(key) if step.repeat => {
                println!("{}← {} - {} {}", indent, style(key).cyan(), name, style("(see above)").dim())
            }
            Some(key) => println!("{}← {} - {}", indent, style(key).cyan(), name),
            None => println!("{}← {} {}", indent, name, style("(not in catalogue)").yellow()),
        }
    }

    // Every record of this name plus their ancestors, minus the root itself
    let ancestors = lineage(index, &args.name).len().saturating_sub(1);
    println!();
    println!(
        "{} ancestor(s), {} step(s) shown",
        style(ancestors).cyan(),
        steps.len()
    );

    Ok(())
}

fn cli_name(kind: ChainKind) -> &'static str {
    match kind {
        ChainKind::Weapon => "weapon",
        ChainKind::Ring => "ring",
        ChainKind::Equip => "equip",
        ChainKind::Task => "task",
    }
}
