use armory::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    setup_tracing(global.verbose);

    match cli.command {
        Commands::Weapon(cmd) => armory::cli::commands::weapon::run(cmd, &global),
        Commands::Ring(cmd) => armory::cli::commands::ring::run(cmd, &global),
        Commands::Equip(cmd) => armory::cli::commands::equip::run(cmd, &global),
        Commands::Task(cmd) => armory::cli::commands::task::run(cmd, &global),
        Commands::Item(cmd) => armory::cli::commands::item::run(cmd, &global),
        Commands::Chain(args) => armory::cli::commands::chain::run(args, &global),
        Commands::Check(args) => armory::cli::commands::check::run(args, &global),
        Commands::Completions(args) => armory::cli::commands::completions::run(args),
    }
}

/// Diagnostics go to stderr; `ARMORY_LOG` overrides the level.
fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("ARMORY_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("armory=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
