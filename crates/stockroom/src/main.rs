//! `stockroom` - CLI for the stockroom inventory tracker
//!
//! This binary provides the command-line interface: one-shot commands that
//! change or show the inventory, and an interactive shell.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use clap::Parser;

use stockroom::cli::{Cli, Command, ConfigCommand};
use stockroom::persistence::INVENTORY_KEY;
use stockroom::shell::{describe, Shell};
use stockroom::storage::SqliteStore;
use stockroom::surface::{TerminalSurface, ViewSelection};
use stockroom::{
    init_logging, Config, Controller, Event, Field, InventoryStore, Outcome, Persistence,
};

type AppResult = Result<(), Box<dyn std::error::Error>>;

type Terminal = TerminalSurface<io::Stdout, io::StdinLock<'static>>;

fn main() -> AppResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Add(cmd) => {
            let mut controller = mount(&config, ViewSelection::TABLE, false)?;
            let form = controller.surface_mut().form_mut();
            form.set_value(Field::Name, cmd.name);
            form.set_value(Field::Quantity, cmd.quantity);
            form.set_value(Field::Price, cmd.price);
            let outcome = controller.dispatch(Event::Submit)?;
            finish(&mut controller, &outcome)?;
            if let Outcome::Rejected(errors) = outcome {
                return Err(format!("item not added: {errors}").into());
            }
            Ok(())
        }
        Command::Delete(cmd) => {
            let mut controller = mount(&config, ViewSelection::TABLE, false)?;
            let id = controller
                .store()
                .resolve_id(&cmd.id)
                .ok_or_else(|| format!("no item matches \"{}\"", cmd.id))?;
            let outcome = controller.dispatch(Event::Delete(id))?;
            finish(&mut controller, &outcome)
        }
        Command::Clear(cmd) => {
            let mut controller = mount(&config, ViewSelection::NONE, cmd.yes)?;
            let outcome = controller.dispatch(Event::ClearAll)?;
            finish(&mut controller, &outcome)
        }
        Command::List(cmd) => {
            if cmd.json {
                return print_json(&config);
            }
            let mut controller = mount(&config, ViewSelection::TABLE, false)?;
            controller.surface_mut().present()?;
            Ok(())
        }
        Command::Chart(cmd) => {
            let mut config = config;
            if let Some(width) = cmd.width {
                config.chart.width = width;
                config.validate()?;
            }
            let mut controller = mount(&config, ViewSelection::CHART, false)?;
            controller.dispatch(Event::SetMode(cmd.mode.into()))?;
            controller.surface_mut().present()?;
            Ok(())
        }
        Command::Shell => {
            let controller = mount(&config, ViewSelection::ALL, false)?;
            Shell::new(controller).run()?;
            Ok(())
        }
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> stockroom::Result<InventoryStore<SqliteStore>> {
    let kv = SqliteStore::open(config.database_path())?;
    Ok(InventoryStore::open(Persistence::new(kv)))
}

fn mount(
    config: &Config,
    views: ViewSelection,
    assume_yes: bool,
) -> Result<Controller<SqliteStore, Terminal>, Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let surface = TerminalSurface::new(io::stdout(), io::stdin().lock())
        .with_views(views)
        .assume_yes(assume_yes);
    Controller::mount(surface, store, config).ok_or_else(|| "terminal has no item form".into())
}

fn finish(controller: &mut Controller<SqliteStore, Terminal>, outcome: &Outcome) -> AppResult {
    let surface = controller.surface_mut();
    if let Some(message) = describe(outcome) {
        surface.say(&message)?;
    }
    surface.present()?;
    Ok(())
}

fn print_json(config: &Config) -> AppResult {
    let store = open_store(config)?;
    let listing = serde_json::json!({
        "items": store.items(),
        "summary": store.summary(),
    });
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> AppResult {
    let store = open_store(config)?;
    let kv = store.persistence().store();
    let stats = kv.stats()?;
    let updated_at = kv.updated_at(INVENTORY_KEY)?;
    let summary = store.summary();
    let format = config.number_format();

    if json {
        let status = serde_json::json!({
            "database_path": kv.path(),
            "db_size_bytes": stats.db_size_bytes,
            "keys": stats.keys,
            "last_saved": updated_at,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        let last_saved = updated_at.map_or_else(|| "never".to_string(), |t| t.to_rfc3339());
        println!("stockroom status");
        println!("----------------");
        println!("Database:      {}", kv.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("Last saved:    {last_saved}");
        println!("Items:         {}", summary.item_count);
        println!("Quantity:      {}", format.quantity(summary.total_quantity));
        println!("Total value:   {}", format.currency(summary.total_value));
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> AppResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:       {}", config.database_path().display());
                println!();
                println!("[Display]");
                println!("  Currency symbol:     {}", config.display.currency_symbol);
                println!("  Thousands separator: {:?}", config.display.thousands_separator);
                println!("  Decimal separator:   {:?}", config.display.decimal_separator);
                println!();
                println!("[Chart]");
                println!("  Width:               {}", config.chart.width);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    io::stdout().flush()?;
    Ok(())
}
