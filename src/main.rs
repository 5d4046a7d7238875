mod cli;
mod commands;
mod db;
mod directory;
mod models;
mod output;
mod platform;
mod query;
mod settings;

use anyhow::Result;
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::context::RunContext;
use settings::{SettingsStore, TomlSettingsStore};

fn main() -> Result<()> {
    setup_broken_pipe_handling();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = TomlSettingsStore::default_location()?;
    let ctx = RunContext::from_args(cli.json, cli.no_color, cli.utc, store.load_or_default())?;

    // Settings don't need a database
    if let Commands::Settings { action } = &cli.command {
        commands::settings::run(&store, action.as_ref(), ctx.output_mode)?;
        return Ok(());
    }

    let db_path = match cli.db.as_deref() {
        Some(path) => path.to_path_buf(),
        None => db::connection::default_db_path()?,
    };
    let mut conn = get_connection(&db_path)?;

    match &cli.command {
        Commands::Contacts { action } => {
            commands::contacts::run(&mut conn, action, &ctx)?;
        }

        Commands::Search { query } => {
            commands::search::run(&conn, query, &ctx)?;
        }

        Commands::Recents {
            filter,
            limit,
            date,
            since,
            until,
        } => {
            let opts = commands::recents::RecentsOptions {
                filter: *filter,
                limit: *limit,
                date: date.as_deref(),
                since: since.as_deref(),
                until: until.as_deref(),
            };
            commands::recents::run(&conn, &opts, &ctx)?;
        }

        Commands::History { number } => {
            commands::history::run(&conn, number, &ctx)?;
        }

        Commands::Import { file, replace } => {
            commands::import::run(&mut conn, file, *replace, ctx.output_mode)?;
        }

        Commands::Info => {
            commands::info::run(&conn, &db_path, &ctx)?;
        }

        Commands::Settings { .. } => unreachable!(), // Handled above
    }

    Ok(())
}

/// Initialize logging based on the `--verbose` flag or `DIALBOOK_LOG` env var.
///
/// - `DIALBOOK_LOG` env var: full filter control (e.g. `DIALBOOK_LOG=dialbook::directory=debug`)
/// - `--verbose`: sets `dialbook` crate to `Debug` level
/// - Otherwise: `Warn` level only (effectively silent)
fn init_logging(verbose: bool) {
    let env_var = std::env::var("DIALBOOK_LOG").ok();

    let mut builder = env_logger::Builder::new();
    builder.format_target(true);
    builder.format_module_path(false);

    if let Some(ref filter) = env_var {
        builder.parse_filters(filter);
    } else if verbose {
        builder.filter_module("dialbook", log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }

    builder.init();
}

/// Handle broken pipe gracefully instead of panicking.
///
/// When output is piped to a process that exits early (e.g., `dialbook recents --json | head -1`),
/// Rust's `println!` panics because the runtime sets SIGPIPE to SIG_IGN. This function:
/// - On Unix: resets SIGPIPE to default behavior so the OS terminates the process cleanly
/// - On all platforms: installs a panic hook that exits silently on stdout pipe failures
fn setup_broken_pipe_handling() {
    #[cfg(unix)]
    unsafe {
        // SIGPIPE = 13, SIG_DFL = 0
        unsafe extern "C" {
            fn signal(sig: i32, handler: usize) -> usize;
        }
        signal(13, 0);
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info
            .payload()
            .downcast_ref::<String>()
            .map(|s| s.as_str())
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("");

        if msg.contains("failed printing to stdout") {
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

/// Open the database at `db_path`, creating and migrating it as needed
fn get_connection(db_path: &std::path::Path) -> Result<Connection> {
    db::connection::open_db_at_path(db_path)
}
