// Command-line parsing for the `crative` driver.
//
// Plain `std::env::args()` matching, no clap dependency. Parsing is kept
// separate from `main()` so it can be tested without exiting the process:
// `parse()` returns either an `Invocation` or a message for stderr.

use std::path::PathBuf;

/// A level named on the command line, by index (`14`) or name (`factor20`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelArg {
    Index(usize),
    Name(String),
}

impl LevelArg {
    fn parse(raw: &str) -> Self {
        match raw.parse() {
            Ok(index) => LevelArg::Index(index),
            Err(_) => LevelArg::Name(raw.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print every level with its prompt.
    List,
    /// Print a level's starting grid as snapshot JSON.
    Seed { level: LevelArg },
    /// Judge one snapshot. The level comes from `--level` or the snapshot.
    Check {
        path: PathBuf,
        level: Option<LevelArg>,
    },
    /// Judge many snapshots, each naming its own level.
    Verify { paths: Vec<PathBuf> },
    /// Print the group count and sizes of a snapshot.
    Groups { path: PathBuf },
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    /// `--config PATH`; defaults apply when absent.
    pub config: Option<PathBuf>,
}

/// Parse arguments, excluding the program name.
pub fn parse(args: &[String]) -> Result<Invocation, String> {
    let mut config = None;
    let mut level = None;
    let mut positional = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config = Some(PathBuf::from(
                    args.get(i).ok_or("--config requires a path")?,
                ));
            }
            "--level" => {
                i += 1;
                level = Some(LevelArg::parse(
                    args.get(i).ok_or("--level requires a level index or name")?,
                ));
            }
            "--help" | "-h" => {
                return Ok(Invocation {
                    command: Command::Help,
                    config,
                });
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown argument: {other}"));
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let Some((name, rest)) = positional.split_first() else {
        return Err("missing command".to_string());
    };

    let command = match name.as_str() {
        "list" => {
            expect_no_more(name, rest)?;
            Command::List
        }
        "seed" => match rest {
            [raw] => Command::Seed {
                level: LevelArg::parse(raw),
            },
            _ => return Err("seed takes exactly one level".to_string()),
        },
        "check" => match rest {
            [path] => Command::Check {
                path: PathBuf::from(path),
                level: level.take(),
            },
            _ => return Err("check takes exactly one snapshot path".to_string()),
        },
        "verify" => {
            if rest.is_empty() {
                return Err("verify needs at least one snapshot path".to_string());
            }
            Command::Verify {
                paths: rest.iter().map(PathBuf::from).collect(),
            }
        }
        "groups" => match rest {
            [path] => Command::Groups {
                path: PathBuf::from(path),
            },
            _ => return Err("groups takes exactly one snapshot path".to_string()),
        },
        other => return Err(format!("Unknown command: {other}")),
    };

    if level.is_some() {
        return Err("--level only applies to check".to_string());
    }

    Ok(Invocation { command, config })
}

fn expect_no_more(name: &str, rest: &[String]) -> Result<(), String> {
    match rest.first() {
        None => Ok(()),
        Some(extra) => Err(format!("{name} takes no arguments (got {extra})")),
    }
}

pub fn print_usage() {
    println!("Usage: crative <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  list                      List every level and its prompt");
    println!("  seed <LEVEL>              Print a level's starting grid as JSON");
    println!("  check <GRID.json>         Judge a grid (exit 0 pass, 2 fail, 1 error)");
    println!("  verify <GRID.json>...     Judge many grids in parallel, each naming its level");
    println!("  groups <GRID.json>        Print the connected groups of a grid");
    println!();
    println!("Options:");
    println!("  --config <PATH>           JSON config (grid size, feedback text)");
    println!("  --level <LEVEL>           Level for check, by index or name");
    println!("  --help, -h                Show this help");
    println!();
    println!("Set RUST_LOG=info to see verdict logging.");
}
