// Command implementations for the `crative` driver.
//
// Every command returns a process exit code: 0 for success (or a pass),
// 2 when a judged grid fails its level, and errors surface as `CliError`
// for `main()` to report with exit code 1.
//
// Snapshots must match the configured grid size. World-anchored levels
// place their starting crates around the grid's center, so judging a
// snapshot of another size against them would silently misalign.

use std::fs;
use std::path::{Path, PathBuf};

use crative_core::{
    ChallengeRegistry, CrativeConfig, CrativeError, GridSnapshot, VoxelGrid, group_cells,
};
use log::{debug, info};
use rayon::prelude::*;
use thiserror::Error;

use crate::args::{Command, Invocation, LevelArg, print_usage};

pub const EXIT_PASS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_FAIL: i32 = 2;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CrativeError),

    #[error("no level named `{0}`")]
    UnknownLevel(String),

    #[error("{path}: no level given (pass --level or set `level` in the snapshot)")]
    MissingLevel { path: PathBuf },

    #[error("{path}: snapshot size {found:?} does not match configured grid size {expected:?}")]
    SizeMismatch {
        path: PathBuf,
        found: (u32, u32, u32),
        expected: (u32, u32, u32),
    },

    #[error("{path}: {source}")]
    Snapshot {
        path: PathBuf,
        source: CrativeError,
    },
}

pub fn run(invocation: Invocation) -> Result<i32, CliError> {
    let config = match &invocation.config {
        Some(path) => CrativeConfig::load(path)?,
        None => CrativeConfig::default(),
    };
    debug!("grid size {:?}", config.grid_size);

    match invocation.command {
        Command::Help => {
            print_usage();
            Ok(EXIT_PASS)
        }
        Command::List => list(&config),
        Command::Seed { level } => seed(&config, &level),
        Command::Check { path, level } => check(&config, &path, level.as_ref()),
        Command::Verify { paths } => verify(&config, &paths),
        Command::Groups { path } => groups(&path),
    }
}

fn resolve_level(registry: &ChallengeRegistry, level: &LevelArg) -> Result<usize, CliError> {
    match level {
        LevelArg::Index(index) if *index < registry.len() => Ok(*index),
        LevelArg::Index(index) => Err(CrativeError::LevelOutOfRange {
            level: *index,
            count: registry.len(),
        }
        .into()),
        LevelArg::Name(name) => registry
            .position(name)
            .ok_or_else(|| CliError::UnknownLevel(name.clone())),
    }
}

fn read_snapshot(path: &Path) -> Result<GridSnapshot, CliError> {
    let wrap = |source: CrativeError| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    };
    let json = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    GridSnapshot::from_json(&json).map_err(wrap)
}

fn list(config: &CrativeConfig) -> Result<i32, CliError> {
    let registry = config.standard_registry()?;
    for (level, challenge) in registry.iter().enumerate() {
        println!(
            "{level:>2}  {:<20} {}",
            challenge.name, challenge.prompt
        );
    }
    Ok(EXIT_PASS)
}

fn seed(config: &CrativeConfig, level: &LevelArg) -> Result<i32, CliError> {
    let registry = config.standard_registry()?;
    let level = resolve_level(&registry, level)?;
    let mut grid = config.empty_grid();
    grid.seed(registry.initial_cells(level)?);
    let mut snapshot = grid.snapshot();
    snapshot.level = Some(level);
    println!("{}", snapshot.to_json()?);
    Ok(EXIT_PASS)
}

/// Judge one snapshot file. `Ok(true)` on a pass.
fn judge(
    config: &CrativeConfig,
    registry: &ChallengeRegistry,
    path: &Path,
    level: Option<&LevelArg>,
) -> Result<(usize, bool), CliError> {
    let snapshot = read_snapshot(path)?;
    if snapshot.size != config.grid_size {
        return Err(CliError::SizeMismatch {
            path: path.to_path_buf(),
            found: snapshot.size,
            expected: config.grid_size,
        });
    }
    let level = match (level, snapshot.level) {
        (Some(arg), _) => resolve_level(registry, arg)?,
        (None, Some(index)) => resolve_level(registry, &LevelArg::Index(index))?,
        (None, None) => {
            return Err(CliError::MissingLevel {
                path: path.to_path_buf(),
            });
        }
    };
    let grid = VoxelGrid::from_snapshot(&snapshot).map_err(|source| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    let passed = registry.evaluate(&grid, level)?;
    info!("{}: level {} -> {}", path.display(), level, passed);
    Ok((level, passed))
}

fn check(config: &CrativeConfig, path: &Path, level: Option<&LevelArg>) -> Result<i32, CliError> {
    let registry = config.standard_registry()?;
    let (level, passed) = judge(config, &registry, path, level)?;
    let name = registry.get(level).map_or("?", |c| c.name.as_str());
    if passed {
        println!("PASS {name}: {}", config.feedback.success);
        Ok(EXIT_PASS)
    } else {
        println!("FAIL {name}: {}", config.feedback.failure);
        Ok(EXIT_FAIL)
    }
}

fn verify(config: &CrativeConfig, paths: &[PathBuf]) -> Result<i32, CliError> {
    let registry = config.standard_registry()?;
    let results: Vec<Result<(usize, bool), CliError>> = paths
        .par_iter()
        .map(|path| judge(config, &registry, path, None))
        .collect();

    let mut code = EXIT_PASS;
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok((level, true)) => println!("PASS {} (level {level})", path.display()),
            Ok((level, false)) => {
                println!("FAIL {} (level {level})", path.display());
                if code == EXIT_PASS {
                    code = EXIT_FAIL;
                }
            }
            Err(e) => {
                eprintln!("ERROR {e}");
                code = EXIT_ERROR;
            }
        }
    }
    Ok(code)
}

fn groups(path: &Path) -> Result<i32, CliError> {
    let snapshot = read_snapshot(path)?;
    let grid = VoxelGrid::from_snapshot(&snapshot).map_err(|source| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    let partition = group_cells(&grid);
    let mut sizes: Vec<usize> = partition.iter().map(|g| g.len()).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    println!("{} groups", sizes.len());
    for size in sizes {
        println!("  {size}");
    }
    Ok(EXIT_PASS)
}
