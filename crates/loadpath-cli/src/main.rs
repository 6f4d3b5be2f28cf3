//! loadpath CLI - inspect and rearrange a loadable-unit search path.
//!
//! Builds a process registry (seeded from `$LOADPATH` unless `--no-env`),
//! applies the given operations in order to one context and prints the
//! resulting search order, or the unit found with `--find`.

mod op;

use anyhow::Result;
use clap::Parser;
use loadpath::{
    DuplicatePolicy, Insertion, LoadPathError, Location, Removal, ResolvedUnit,
    SearchPathRegistry,
};
use op::{Op, OpKind};
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "loadpath")]
#[command(about = "Inspect and rearrange a loadable-unit search path")]
struct Args {
    /// Context to operate on (defaults to the system context)
    #[arg(short, long)]
    context: Option<String>,

    /// Parent the context delegates to when it is first created
    #[arg(long, requires = "context")]
    parent: Option<String>,

    /// Skip insertions of locations the context already holds
    #[arg(long)]
    no_duplicates: bool,

    /// Do not seed the system context from $LOADPATH
    #[arg(long)]
    no_env: bool,

    /// Resolve a unit by relative name after applying the operations
    #[arg(long, value_name = "UNIT")]
    find: Option<String>,

    /// Print a JSON report instead of plain lines
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Operations applied in order: prepend=LOC, append=LOC, remove=LOC
    #[arg(value_name = "OP")]
    ops: Vec<Op>,
}

#[derive(Debug, Serialize)]
struct Report {
    context: String,
    locations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    found: Option<ResolvedUnit>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable.
    FmtSubscriber::builder()
        .with_max_level(log_level(args.debug))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let report = match run(&args) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("loadpath: {:#}", err);
            let code = err
                .downcast_ref::<LoadPathError>()
                .map(LoadPathError::exit_code)
                .unwrap_or(1);
            return ExitCode::from(code);
        }
    };

    if let Err(err) = print_report(&args, &report) {
        eprintln!("loadpath: {:#}", err);
        return ExitCode::FAILURE;
    }

    if args.find.is_some() && report.found.is_none() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn log_level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn build_registry(args: &Args) -> SearchPathRegistry {
    let policy = if args.no_duplicates {
        DuplicatePolicy::Forbid
    } else {
        DuplicatePolicy::Allow
    };
    SearchPathRegistry::builder()
        .duplicate_policy(policy)
        .seed_from_env(!args.no_env)
        .build()
}

fn run(args: &Args) -> Result<Report> {
    let registry = build_registry(args);

    let context = match (&args.context, &args.parent) {
        (Some(name), Some(parent)) => registry.resolve_child(name, parent)?,
        (Some(name), None) => registry.context(name)?,
        (None, _) => registry.default_context(),
    };
    info!("Operating on context '{}'", context.name());

    for op in &args.ops {
        let location = Location::parse(&op.location)?;
        match op.kind {
            OpKind::Prepend => {
                if context.prepend(location) == Insertion::AlreadyPresent {
                    debug!("{} already present", op.location);
                }
            }
            OpKind::Append => {
                if context.append(location) == Insertion::AlreadyPresent {
                    debug!("{} already present", op.location);
                }
            }
            OpKind::Remove => {
                if context.remove(&location) == Removal::NotFound {
                    info!("{} not in context '{}'", op.location, context.name());
                }
            }
        }
    }

    let found = args.find.as_deref().and_then(|unit| context.find_unit(unit));

    Ok(Report {
        context: context.name().to_string(),
        locations: context.snapshot().identifiers(),
        found,
    })
}

fn print_report(args: &Args, report: &Report) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if args.find.is_some() {
        if let Some(found) = &report.found {
            println!("{}", found.path.display());
        }
    } else {
        for location in &report.locations {
            println!("{}", location);
        }
    }
    Ok(())
}
