//! # Brazeguide CLI Application
//!
//! Command-line front end for the equation resolver and the brazing and
//! welding reference pages.
//!
//! Usage:
//!   braze_cli [--config <path>] <command> [args]
//!
//! Examples:
//!   braze_cli solve shear-stress stress=30000 area=0.5
//!   braze_cli solve air-bending-force force=1500 dieFactor=1.33 tensileStrength=60000 width=10 dieOpening=0.5 thickness=0 --for thickness
//!   braze_cli table fillers --filter stainless

use std::env;
use std::path::PathBuf;
use std::process;

use braze_core::documents::{document_status, download_missing, HttpFetcher};
use braze_core::equations::{catalog, solve, solve_for, Bindings, Equation, Solution};
use braze_core::errors::GuideError;
use braze_core::pdf_tables::load_milstd248_tables;
use braze_core::reference::{Page, TableId};
use braze_core::settings::GuideSettings;

/// Default settings file, read if present
const DEFAULT_CONFIG: &str = "brazeguide.json";

/// Why a command did not complete
#[derive(Debug)]
enum Failure {
    /// Bad command line; usage is printed
    Usage(String),
    Guide(GuideError),
}

impl From<GuideError> for Failure {
    fn from(e: GuideError) -> Self {
        Failure::Guide(e)
    }
}

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Invocation {
    config: Option<PathBuf>,
    help: bool,
    command: Vec<String>,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let invocation = match parse_invocation(&args) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage();
            process::exit(2);
        }
    };

    if invocation.help || invocation.command.is_empty() {
        print_usage();
        return;
    }

    match run(&invocation) {
        Ok(()) => {}
        Err(Failure::Usage(message)) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage();
            process::exit(2);
        }
        Err(Failure::Guide(e)) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            process::exit(1);
        }
    }
}

fn parse_invocation(args: &[String]) -> Result<Invocation, String> {
    let mut config = None;
    let mut help = false;
    let mut command = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let path = args.get(i + 1).ok_or("--config needs a path")?;
                config = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => help = true,
            _ => command.push(args[i].clone()),
        }
        i += 1;
    }

    Ok(Invocation { config, help, command })
}

fn load_settings(invocation: &Invocation) -> Result<GuideSettings, GuideError> {
    match &invocation.config {
        Some(path) => GuideSettings::load(path),
        None => GuideSettings::load_or_default(&PathBuf::from(DEFAULT_CONFIG)),
    }
}

fn run(invocation: &Invocation) -> Result<(), Failure> {
    let command = &invocation.command;
    let rest = &command[1..];

    match command[0].as_str() {
        "equations" => cmd_equations(rest),
        "equation" => cmd_equation(rest),
        "solve" => cmd_solve(rest),
        "pages" => {
            cmd_pages();
            Ok(())
        }
        "page" => cmd_page(rest),
        "table" => cmd_table(rest),
        "docs" => cmd_docs(rest, &load_settings(invocation)?),
        "extract" => {
            cmd_extract(&load_settings(invocation)?);
            Ok(())
        }
        other => Err(Failure::Usage(format!("Unknown command: {}", other))),
    }
}

// ============================================================================
// Equations
// ============================================================================

fn cmd_equations(args: &[String]) -> Result<(), Failure> {
    if args.iter().any(|a| a == "--json") {
        let json = serde_json::to_string_pretty(catalog()).map_err(GuideError::from)?;
        println!("{}", json);
        return Ok(());
    }

    for category in Equation::all_categories() {
        println!("{}", category.display_name());
        for eq in Equation::in_category(category) {
            let meta = eq.metadata();
            println!("  {:<20} {:<22} {}", eq.id(), meta.name, meta.formula_plain);
        }
        println!();
    }
    Ok(())
}

fn cmd_equation(args: &[String]) -> Result<(), Failure> {
    let id = args.first().ok_or_else(|| Failure::Usage("equation needs an id".to_string()))?;
    let eq = Equation::from_id(id)?;
    let meta = eq.metadata();

    println!("{} ({})", meta.name, eq.id());
    println!("{}", meta.description);
    println!();
    println!("  Formula:  {}", meta.formula_plain);
    println!("  Residual: {} = 0", eq.relation());
    println!("  Source:   {}", meta.reference.citation());
    println!();
    println!("Variables:");
    for var in &meta.variables {
        println!(
            "  {:<16} {:<8} {:<5} {}",
            var.symbol,
            var.units,
            var.domain.describe(),
            var.description
        );
    }
    if !meta.assumptions.is_empty() {
        println!();
        println!("Assumptions:");
        for assumption in &meta.assumptions {
            println!("  - {}", assumption);
        }
    }
    Ok(())
}

fn cmd_solve(args: &[String]) -> Result<(), Failure> {
    let id = args.first().ok_or_else(|| Failure::Usage("solve needs an equation id".to_string()))?;

    let mut bindings = Bindings::new();
    let mut unknown: Option<String> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--for" => {
                let symbol = args
                    .get(i + 1)
                    .ok_or_else(|| Failure::Usage("--for needs a variable".to_string()))?;
                unknown = Some(symbol.clone());
                i += 1;
            }
            "--json" => json = true,
            binding => {
                let (symbol, value) = parse_binding(binding)?;
                bindings.insert(symbol, value);
            }
        }
        i += 1;
    }

    let solution = match &unknown {
        Some(symbol) => solve_for(id, symbol, &bindings)?,
        None => solve(id, &bindings)?,
    };

    if json {
        let text = serde_json::to_string_pretty(&solution).map_err(GuideError::from)?;
        println!("{}", text);
    } else {
        println!("{}", format_solution(&solution));
    }
    Ok(())
}

/// Parse `name=value` into a binding
fn parse_binding(arg: &str) -> Result<(String, f64), Failure> {
    let (symbol, raw) = arg
        .split_once('=')
        .ok_or_else(|| Failure::Usage(format!("Expected name=value, got '{}'", arg)))?;
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(Failure::Usage(format!("Missing variable name in '{}'", arg)));
    }
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| GuideError::invalid_value(symbol, raw, "Not a number"))?;
    Ok((symbol.to_string(), value))
}

fn format_solution(solution: &Solution) -> String {
    format!(
        "{} = {} {}  ({})",
        solution.unknown,
        format_value(solution.value),
        solution.units,
        solution.equation.metadata().name
    )
}

/// Ten significant digits, scientific notation for very small or large values
fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let rounded: f64 = format!("{:.9e}", value).parse().unwrap_or(value);
    let magnitude = rounded.abs();
    if !(1e-4..1e15).contains(&magnitude) {
        format!("{:e}", rounded)
    } else {
        format!("{}", rounded)
    }
}

// ============================================================================
// Reference pages
// ============================================================================

fn cmd_pages() {
    for page in Page::ALL {
        println!("  {:<16} {}", page.id(), page.title());
    }
    println!();
    println!("Tables:");
    for table in TableId::ALL {
        println!("  {:<26} {}", table.id(), table.table().title);
    }
}

fn cmd_page(args: &[String]) -> Result<(), Failure> {
    let name = args.first().ok_or_else(|| Failure::Usage("page needs a name".to_string()))?;
    let page = Page::from_str_flexible(name)?;
    print!("{}", page.render_markdown());
    Ok(())
}

fn cmd_table(args: &[String]) -> Result<(), Failure> {
    let id = args.first().ok_or_else(|| Failure::Usage("table needs an id".to_string()))?;
    let table = TableId::from_str_flexible(id)?.table();

    let mut filter: Option<&str> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--filter" => {
                let needle = args
                    .get(i + 1)
                    .ok_or_else(|| Failure::Usage("--filter needs text".to_string()))?;
                filter = Some(needle.as_str());
                i += 1;
            }
            other => return Err(Failure::Usage(format!("Unknown option: {}", other))),
        }
        i += 1;
    }

    println!("## {}", table.title);
    println!();
    match filter {
        Some(needle) => {
            let rows = table.filter(needle);
            if rows.is_empty() {
                println!("No rows match '{}'.", needle);
            } else {
                print!("{}", table.rows_to_markdown(&rows));
            }
        }
        None => print!("{}", table.to_markdown()),
    }
    Ok(())
}

// ============================================================================
// Documents
// ============================================================================

fn cmd_docs(args: &[String], settings: &GuideSettings) -> Result<(), Failure> {
    match args.first().map(|s| s.as_str()) {
        None => {
            for status in document_status(settings) {
                let state = match status.modified {
                    Some(modified) if status.exists => format!(
                        "present, {} bytes, modified {}",
                        status.size_bytes,
                        modified.format("%Y-%m-%d %H:%M UTC")
                    ),
                    _ if status.exists => format!("present, {} bytes", status.size_bytes),
                    _ => "missing".to_string(),
                };
                println!("{}", status.document);
                println!("  Source: {}", status.external_url);
                println!("  Local:  {} ({})", status.local_path.display(), state);
            }
            Ok(())
        }
        Some("download") => {
            let fetcher = HttpFetcher::new(settings)?;
            println!("Downloading reference documents to {}...", settings.files_dir.display());
            let outcomes = download_missing(settings, &fetcher);
            for outcome in &outcomes {
                let mark = if outcome.success { "[OK]" } else { "[FAIL]" };
                println!("  {} {}: {}", mark, outcome.document, outcome.message);
            }
            if outcomes.iter().any(|o| !o.success) {
                process::exit(1);
            }
            Ok(())
        }
        Some(other) => Err(Failure::Usage(format!("Unknown docs subcommand: {}", other))),
    }
}

fn cmd_extract(settings: &GuideSettings) {
    let extracted = load_milstd248_tables(settings);
    if extracted.is_empty() {
        println!("No tables found. Run 'docs download' to fetch a local copy of MIL-STD-248D.");
        return;
    }

    println!("Found {} table regions", extracted.tables.len());
    for (i, table) in extracted.tables.iter().enumerate() {
        println!();
        println!("## Table {}", i + 1);
        for row in table {
            println!("  {}", row);
        }
    }
    if !extracted.footnotes.is_empty() {
        println!();
        println!("Footnotes:");
        for note in &extracted.footnotes {
            println!("  {}", note);
        }
    }
}

fn print_usage() {
    println!("Brazeguide - sheet metal brazing and welding quick reference");
    println!();
    println!("USAGE:");
    println!("    braze_cli [--config <path>] <command> [args]");
    println!();
    println!("COMMANDS:");
    println!("    equations [--json]                        List the equation catalog");
    println!("    equation <id>                             Show one equation and its variables");
    println!("    solve <id> name=value... [--for <sym>] [--json]");
    println!("                                              Solve for the missing variable");
    println!("    pages                                     List reference pages and tables");
    println!("    page <name>                               Show a reference page");
    println!("    table <id> [--filter <text>]              Show a table, optionally filtered");
    println!("    docs                                      Show local reference document status");
    println!("    docs download                             Download missing reference documents");
    println!("    extract                                   Extract tables from local MIL-STD-248D");
    println!();
    println!("OPTIONS:");
    println!("    --config <path>    Settings file (default: {} if present)", DEFAULT_CONFIG);
    println!("    -h, --help         Show this help message");
}
