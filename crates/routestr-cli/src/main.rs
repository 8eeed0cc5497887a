// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use routestr_core::{Flightplan, RouteStringOptions, RouteStringReader, RouteStringWriter};
use routestr_nav::NavDatabase;
use settings::{Settings, SettingsManager};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Navigation data JSON file
    #[arg(short, long, global = true, env = "ROUTESTR_NAVDB")]
    nav: Option<PathBuf>,

    /// More log output, repeat for debug messages
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a route description and print the flight plan
    Read {
        route: String,
        /// Options like "DEFAULT|READ_ALTERNATES", saved defaults otherwise
        #[arg(short, long)]
        options: Option<String>,
        /// Print the flight plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the route description of a flight plan JSON file
    Write {
        #[arg(short, long)]
        plan: PathBuf,
        /// Cruise speed in knots
        #[arg(short, long)]
        speed: Option<f32>,
        #[arg(short, long)]
        options: Option<String>,
    },
    /// Show or change the saved default options
    Options {
        #[arg(long)]
        set: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logging")?;

    let manager = SettingsManager::new();
    let mut settings = manager.load()?;

    match &cli.command {
        Commands::Read {
            route,
            options,
            json,
        } => {
            let options = resolve_options(options.as_deref(), &settings)?;
            let db = open_navdata(cli.nav.as_deref(), &settings)?;
            let (plan, report) = RouteStringReader::new(&db).read(route, options);

            for diagnostic in report.diagnostics() {
                eprintln!("{}", diagnostic);
            }
            if report.is_fatal() {
                anyhow::bail!("Could not read route");
            }

            if *json {
                let text =
                    serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
                println!("{}", text);
            } else {
                print_plan(&plan);
            }
        }
        Commands::Write {
            plan,
            speed,
            options,
        } => {
            let options = resolve_options(options.as_deref(), &settings)?;
            let db = open_navdata(cli.nav.as_deref(), &settings)?;
            let plan = load_plan(plan)?;
            let speed = speed
                .or(plan.cruise_speed_kts)
                .unwrap_or(settings.cruise_speed_kts);

            println!(
                "{}",
                RouteStringWriter::new(&db).create_string_for_route(&plan, speed, options)
            );
        }
        Commands::Options { set } => {
            if let Some(list) = set {
                settings.options = list.parse()?;
                manager.save(&settings)?;
                println!("Saved to {}", manager.path().display());
            }
            println!("{}", settings.options);
        }
    }

    Ok(())
}

fn resolve_options(arg: Option<&str>, settings: &Settings) -> Result<RouteStringOptions> {
    match arg {
        Some(list) => list
            .parse()
            .with_context(|| format!("Invalid options '{}'", list)),
        None => Ok(settings.options),
    }
}

fn open_navdata(arg: Option<&Path>, settings: &Settings) -> Result<NavDatabase> {
    let path = arg
        .or(settings.nav_database.as_deref())
        .ok_or_else(|| {
            anyhow::anyhow!("No navigation data. Please specify with --nav or ROUTESTR_NAVDB.")
        })?;
    NavDatabase::from_json_file(path)
        .with_context(|| format!("Failed to load navigation data from {}", path.display()))
}

fn load_plan(path: &Path) -> Result<Flightplan> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_plan(plan: &Flightplan) {
    if let Some(speed) = plan.cruise_speed_kts {
        println!("Cruise: {:.0} kts", speed);
    }
    if let Some(alt) = plan.cruise_altitude_ft {
        println!("Altitude: {} ft", alt);
    }
    println!("Type: {:?}, {:?}", plan.flightplan_type, plan.route_type);

    for entry in &plan.entries {
        let airway = entry.airway.as_deref().unwrap_or("");
        let pos = entry
            .pos
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<10} {:<6} {}",
            airway,
            entry.ident,
            format!("{:?}", entry.entry_type),
            pos
        );
    }

    if !plan.alternates.is_empty() {
        println!("Alternates: {}", plan.alternate_idents().join(" "));
    }
}
