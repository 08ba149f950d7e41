//! parcelq CLI — interactive shell over the in-memory tracking core.
//!
//! The core holds no persistent state, so the shell is a read-eval-print
//! loop: one registry lives for the session, commands mutate or query
//! it. Input validation (field presence, numeric priority) happens here,
//! before the core is called; the core re-validates nothing.

use std::io::{self, BufRead, Write};

use clap::Parser;
use parcelq::config::Config;
use parcelq::error::Error;
use parcelq::registry::{AddOutcome, Registry, UpdateOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parcelq", about = "Package tracking and priority dispatch")]
struct Cli {
    /// Log filter directive, overriding LOG_LEVEL (e.g. "parcelq=debug")
    #[arg(long)]
    log_level: Option<String>,
}

/// A validated shell command, ready for the core.
enum Command {
    Add {
        id: String,
        priority: i32,
    },
    Update {
        id: String,
        location: String,
        timestamp: String,
    },
    Track {
        id: String,
    },
    Show {
        id: String,
    },
    Next,
    Pending,
    Events,
    Help,
    Quit,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let directive = cli.log_level.unwrap_or(config.log_level);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| Error::Config(format!("bad log filter {directive:?}: {e}")))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut registry = Registry::new();
    repl(&mut registry)
}

fn repl(registry: &mut Registry) -> anyhow::Result<()> {
    println!("parcelq — package tracking and priority dispatch (type 'help')");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        write!(out, "parcelq> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break; // EOF
        }

        match parse_command(line.trim()) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => run_command(registry, command)?,
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing and validation
// ---------------------------------------------------------------------------

fn parse_command(line: &str) -> Result<Option<Command>, Error> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match verb {
        "add" => {
            let &[id, priority] = args.as_slice() else {
                return Err(usage("add <id> <priority>"));
            };
            let priority: i32 = priority
                .parse()
                .ok()
                .filter(|p| *p >= 0)
                .ok_or_else(|| Error::Command("priority must be a non-negative integer".into()))?;
            Command::Add {
                id: id.to_string(),
                priority,
            }
        }
        "update" => {
            if args.len() < 3 {
                return Err(usage("update <id> <location> <timestamp>"));
            }
            Command::Update {
                id: args[0].to_string(),
                location: args[1].to_string(),
                // Timestamps are free text and may contain spaces.
                timestamp: args[2..].join(" "),
            }
        }
        "track" => {
            let &[id] = args.as_slice() else {
                return Err(usage("track <id>"));
            };
            Command::Track { id: id.to_string() }
        }
        "show" => {
            let &[id] = args.as_slice() else {
                return Err(usage("show <id>"));
            };
            Command::Show { id: id.to_string() }
        }
        "next" => Command::Next,
        "pending" => Command::Pending,
        "events" => Command::Events,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(Error::Command(format!(
                "unknown command '{other}' (try 'help')"
            )));
        }
    };

    Ok(Some(command))
}

fn usage(usage: &str) -> Error {
    Error::Command(format!("usage: {usage}"))
}

// ---------------------------------------------------------------------------
// Execution and rendering
// ---------------------------------------------------------------------------

fn run_command(registry: &mut Registry, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Add { id, priority } => match registry.add_package(id, priority) {
            AddOutcome::Added => println!("Package added"),
            AddOutcome::AlreadyExists => println!("Package already exists"),
        },
        Command::Update {
            id,
            location,
            timestamp,
        } => match registry.update_tracking(&id, &location, &timestamp) {
            UpdateOutcome::Updated => println!("Tracking updated"),
            UpdateOutcome::NotFound => println!("Package not found"),
        },
        Command::Track { id } => match registry.tracking_info(&id) {
            Some(lines) if lines.is_empty() => println!("(no tracking updates)"),
            Some(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            None => println!("Package not found"),
        },
        Command::Show { id } => match registry.get(&id) {
            Some(record) => {
                println!("ID:       {}", record.id);
                println!("Priority: {}", record.priority);
                println!("Updates:  {}", record.log.len());
            }
            None => println!("Package not found"),
        },
        Command::Next => match registry.next_delivery() {
            Some(id) => println!("Next package for delivery: {id}"),
            None => println!("No packages in queue"),
        },
        Command::Pending => {
            println!("Total packages in queue: {}", registry.pending_count());
        }
        Command::Events => {
            for event in registry.events_since(0) {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  add <id> <priority>              register a package (priority >= 0)");
    println!("  update <id> <location> <time>    append a tracking update");
    println!("  track <id>                       print a package's history");
    println!("  show <id>                        print a package's record");
    println!("  next                             dispatch the highest-priority package");
    println!("  pending                          count of packages awaiting dispatch");
    println!("  events                           dump the event stream as JSON lines");
    println!("  quit                             leave the shell");
}
