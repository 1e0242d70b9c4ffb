//! # Rollwise CLI Application
//!
//! Terminal front end for the bearing design engine.
//!
//! ```bash
//! bearing design --bore 180 --outer 250 --width 160 --radial 400 --rpm 500
//! bearing design --designation 180RV2501 --radial 400 --json
//! bearing prefill 180RV2501
//! bearing equations > EQUATIONS.md
//! bearing settings > rollwise.toml
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the level, `--verbose` raises it
//! to debug); results go to stdout.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use bearing_core::calculations::{
    calculate, prefill_geometry, CustomRoller, DesignInput, DesignResult, Environment, GeometryInput, Mounting,
    OperatingInput, RollerSelection, RollerSource, ServiceConditions,
};
use bearing_core::equations::generate_equations_markdown;
use bearing_core::errors::CalcError;
use bearing_core::settings::EngineSettings;
use bearing_core::tables::LookupTables;
use bearing_core::units::{KiloNewtons, Millimeters};

#[derive(Parser, Debug)]
#[command(name = "bearing", version, about = "Rollwise - four-row cylindrical roller bearing design")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Size a bearing and compute its load ratings
    Design(DesignArgs),
    /// Print the catalog dimensions of a bearing designation
    Prefill {
        /// Bearing designation (e.g., 180RV2501)
        designation: String,
        /// Directory holding the lookup table CSV files
        #[arg(long, env = "ROLLWISE_TABLES")]
        tables: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the equation reference (markdown)
    Equations,
    /// Print the default engine settings (TOML)
    Settings,
}

#[derive(clap::Args, Debug)]
struct DesignArgs {
    /// Bore diameter d (mm)
    #[arg(long)]
    bore: Option<f64>,
    /// Outer diameter D (mm)
    #[arg(long)]
    outer: Option<f64>,
    /// Available width B (mm)
    #[arg(long)]
    width: Option<f64>,
    /// Radial load Fr (kN)
    #[arg(long)]
    radial: f64,
    /// Axial load Fa (kN)
    #[arg(long, default_value_t = 0.0)]
    axial: f64,
    /// Speed (rpm)
    #[arg(long, default_value_t = 0.0)]
    rpm: f64,
    /// Number of roller rows
    #[arg(long, default_value_t = 4)]
    rows: u32,
    /// Race-groove clearance F (mm), bypasses the table
    #[arg(long = "race-groove")]
    race_groove: Option<f64>,
    /// Custom roller diameter (mm)
    #[arg(long, requires = "custom_lw")]
    custom_dw: Option<f64>,
    /// Custom roller length (mm)
    #[arg(long, requires = "custom_dw")]
    custom_lw: Option<f64>,
    /// Choose the catalog candidate with this length (mm)
    #[arg(long)]
    roller_length: Option<f64>,
    /// Catalog designation: prefills missing dimensions and is shown for comparison
    #[arg(long)]
    designation: Option<String>,
    /// Required basic rating life (h)
    #[arg(long)]
    life_hours: Option<f64>,
    /// Operating temperature (°C)
    #[arg(long)]
    temperature: Option<f64>,
    #[arg(long, value_enum)]
    mounting: Option<MountingArg>,
    #[arg(long, value_enum)]
    environment: Option<EnvironmentArg>,
    /// Label for the design
    #[arg(long, default_value = "")]
    label: String,
    /// Directory holding the lookup table CSV files
    #[arg(long, env = "ROLLWISE_TABLES")]
    tables: Option<PathBuf>,
    /// Engine settings file (TOML)
    #[arg(long, env = "ROLLWISE_CONFIG")]
    config: Option<PathBuf>,
    /// List the equations applied after the report
    #[arg(long)]
    show_equations: bool,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MountingArg {
    Fixed,
    Floating,
}

impl From<MountingArg> for Mounting {
    fn from(arg: MountingArg) -> Self {
        match arg {
            MountingArg::Fixed => Mounting::Fixed,
            MountingArg::Floating => Mounting::Floating,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EnvironmentArg {
    Clean,
    Dirty,
    Corrosive,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Clean => Environment::Clean,
            EnvironmentArg::Dirty => Environment::Dirty,
            EnvironmentArg::Corrosive => Environment::Corrosive,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON ({}):", calc.error_code());
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Design(args) => run_design(args),
        Command::Prefill {
            designation,
            tables,
            json,
        } => run_prefill(&designation, tables.as_deref(), json),
        Command::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
        Command::Settings => {
            print!("{}", EngineSettings::default().to_toml_string()?);
            Ok(())
        }
    }
}

/// Load tables from `dir`, or fall back to the built-in datasets.
fn load_tables(dir: Option<&Path>) -> Result<LookupTables> {
    match dir {
        Some(dir) => LookupTables::load_from_dir(dir)
            .with_context(|| format!("loading lookup tables from {}", dir.display())),
        None => Ok(LookupTables::builtin().clone()),
    }
}

fn run_prefill(designation: &str, tables: Option<&Path>, json: bool) -> Result<()> {
    let tables = load_tables(tables)?;
    let record = tables.bearings.lookup(designation)?;

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("{}", record.designation);
    println!("  d = {}", Millimeters(record.d_mm));
    println!("  D = {}", Millimeters(record.outer_d_mm));
    println!("  B = {}", Millimeters(record.b_mm));
    match record.catalog_cr_kn {
        Some(cr) => println!("  Cr (catalog) = {}", KiloNewtons(cr)),
        None => println!("  Cr (catalog) = -"),
    }
    Ok(())
}

fn run_design(args: DesignArgs) -> Result<()> {
    let tables = load_tables(args.tables.as_deref())?;
    let settings = match &args.config {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };

    let geometry = resolve_envelope(&args, &tables)?;
    let operating = OperatingInput {
        radial_load_kn: args.radial,
        axial_load_kn: args.axial,
        rpm: args.rpm,
        rows: args.rows,
    };
    let service = ServiceConditions {
        life_hours: args.life_hours,
        temperature_c: args.temperature,
        mounting: args.mounting.map(Mounting::from),
        environment: args.environment.map(Environment::from),
    };

    let mut input = DesignInput::new(args.label.clone(), geometry, operating).with_service(service);
    if let Some(f) = args.race_groove {
        input = input.with_race_groove_override(f);
    }
    if let (Some(dw_mm), Some(lw_mm)) = (args.custom_dw, args.custom_lw) {
        input = input.with_custom_roller(CustomRoller { dw_mm, lw_mm });
    }
    if let Some(lw) = args.roller_length {
        input = input.with_preferred_roller_length(lw);
    }
    if let Some(designation) = &args.designation {
        input = input.with_designation(designation.clone());
    }

    let result = calculate(&input, &tables, &settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
        if args.show_equations {
            println!();
            print!("{}", result.equations.generate_appendix_markdown());
        }
    }
    Ok(())
}

/// Boundary dimensions from the flags, with missing values taken from the
/// catalog designation.
fn resolve_envelope(args: &DesignArgs, tables: &LookupTables) -> Result<GeometryInput> {
    let catalog = match &args.designation {
        Some(designation) if args.bore.is_none() || args.outer.is_none() || args.width.is_none() => {
            Some(prefill_geometry(designation, tables)?)
        }
        _ => None,
    };

    let pick = |flag: Option<f64>, from_catalog: Option<f64>, name: &str| -> Result<f64> {
        match flag.or(from_catalog) {
            Some(v) => Ok(v),
            None => bail!("--{} is required unless --designation is given", name),
        }
    };

    Ok(GeometryInput {
        d_mm: pick(args.bore, catalog.map(|g| g.d_mm), "bore")?,
        outer_d_mm: pick(args.outer, catalog.map(|g| g.outer_d_mm), "outer")?,
        b_mm: pick(args.width, catalog.map(|g| g.b_mm), "width")?,
    })
}

fn print_report(result: &DesignResult) {
    let g = &result.geometry;
    let derived = &result.derived;

    println!("═══════════════════════════════════════");
    if result.label.is_empty() {
        println!("  BEARING DESIGN RESULTS");
    } else {
        println!("  BEARING DESIGN RESULTS - {}", result.label);
    }
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  d x D x B: {} x {} x {} mm", g.d_mm, g.outer_d_mm, g.b_mm);
    println!(
        "  Loads:     Fr = {}, Fa = {}",
        KiloNewtons(result.operating.radial_load_kn),
        KiloNewtons(result.operating.axial_load_kn)
    );
    println!("  Speed:     {} rpm", result.operating.rpm);
    println!("  Rows:      {}", result.operating.rows);
    if let Some(t) = result.service.temperature_c {
        println!("  Temp:      {} °C", t);
    }
    if let Some(mounting) = result.service.mounting {
        println!("  Mounting:  {}", mounting);
    }
    if let Some(environment) = result.service.environment {
        println!("  Env:       {}", environment);
    }
    println!();
    println!("Geometry:");
    println!("  F      = {} ({})", Millimeters(result.race_groove.f_mm), result.race_groove.method);
    println!("  Dpw    = {}", Millimeters(derived.pitch_diameter_mm));
    println!("  Dw_max = {}", Millimeters(derived.max_roller_diameter_mm));
    println!("  Dw_adj = {}", Millimeters(derived.adjusted_max_roller_diameter_mm));
    println!("  Z      = {} rollers per row", derived.roller_count);
    println!();

    match &result.selection {
        RollerSelection::Selected { roller, candidates } => {
            let source = match roller.source {
                RollerSource::Catalog => "catalog",
                RollerSource::Custom => "custom",
            };
            println!("Roller ({}):", source);
            println!("  Dw x Lw = {}", roller.record);
            println!("  r       = {}", Millimeters(roller.corner_radius_mm));
            println!("  Lwe     = {}", Millimeters(roller.effective_length_mm));
            println!("  Mass/100 = {:.3}", roller.record.mass_per_100);
            if candidates.len() > 1 {
                let lengths: Vec<String> = candidates.iter().map(|c| c.lw_mm.to_string()).collect();
                println!("  Candidate lengths: {} mm (use --roller-length)", lengths.join(", "));
            }
        }
        RollerSelection::NoFit {
            adjusted_max_dw_mm,
            available_width_mm,
        } => {
            println!("Roller: no catalog roller fits {}", status_icon(false));
            println!(
                "  Dw <= {} and Lw <= {} required; supply --custom-dw/--custom-lw",
                Millimeters(*adjusted_max_dw_mm),
                Millimeters(*available_width_mm)
            );
        }
    }

    if let Some(ratings) = &result.ratings {
        println!();
        println!("Load Ratings:");
        println!(
            "  fc  = {:.2} (Dw/Dpw = {:.4}{})",
            ratings.fc,
            ratings.ratio,
            if ratings.ratio_clamped { ", clamped" } else { "" }
        );
        println!("  Cr  = {}", ratings.cr_kn());
        println!("  Cor = {}", ratings.cor_kn());
        if let (Some(reference), Some(ratio)) = (&result.reference_bearing, result.cr_vs_catalog()) {
            println!("  vs {} catalog Cr: {:.2}", reference.designation, ratio);
        }
    }

    if let Some(life) = &result.life {
        println!();
        println!("Rating Life:");
        match life.l10_mrev {
            Some(l10) => println!("  L10  = {:.2} x 10^6 rev", l10),
            None => println!("  L10  = unbounded (no radial load)"),
        }
        match life.l10h_hours {
            Some(hours) => println!("  L10h = {:.0} h", hours),
            None => println!("  L10h = -"),
        }
        if let Some(s0) = life.static_safety_factor {
            println!("  s0   = {:.2}", s0);
        }
        if life.axial_load_ignored {
            println!("  Note: axial load is not carried by the roller set");
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    let verdict = match result.life.and_then(|l| l.meets_required_life) {
        Some(meets) => format!(
            "{} required life {} h",
            status_icon(meets),
            result.service.life_hours.unwrap_or_default()
        ),
        None if result.is_complete() => match result.service.life_hours {
            Some(hours) => format!("required life {} h not evaluated (no speed)", hours),
            None => format!("{} design complete", status_icon(true)),
        },
        None => format!("{} no roller selected", status_icon(false)),
    };
    println!("  RESULT: {}", verdict);
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
