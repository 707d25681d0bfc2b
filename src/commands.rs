use crate::ui;
use anyhow::{Context, Result};
use dragboard::config::{
    init_project_config, load_config, locate_config, ConfigLocation, ConfigScope,
};
use dragboard::logging::init_logging;
use dragboard::script::{parse_script, run_script};
use dragboard::{Board, BoardConfig, BoardEngine, SequentialIds};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn init(force: bool) -> Result<()> {
    let location = init_project_config(force)?;
    println!("Wrote config at {}", location.path.display());
    Ok(())
}

pub fn replay(script: PathBuf, yaml: bool, verbose: bool) -> Result<()> {
    let (config, _location) = load_current_config()?;
    let _logger = init_logging(&config.log, verbose)?;
    let source =
        fs::read_to_string(&script).with_context(|| format!("reading {:?}", script))?;
    let steps = parse_script(&source)?;

    let mut engine = BoardEngine::with_ids(Box::<SequentialIds>::default(), &config);
    let results = run_script(&mut engine, &steps)?;
    if verbose {
        for (idx, (step, result)) in steps.iter().zip(&results).enumerate() {
            eprintln!("{:>3}. {:?} -> {:?}", idx + 1, step, result);
        }
    }

    let board = engine.snapshot();
    if yaml {
        print!(
            "{}",
            serde_yaml::to_string(board.as_ref()).context("serializing board")?
        );
    } else {
        print_board(&board);
    }
    Ok(())
}

pub fn tui() -> Result<()> {
    let (config, location) = load_current_config()?;
    let _logger = init_logging(&config.log, false)?;
    ui::run(BoardEngine::new(&config), location)
}

fn load_current_config() -> Result<(BoardConfig, ConfigLocation)> {
    let cwd = env::current_dir()?;
    let location = locate_config(&cwd)?;
    let config = load_config(&location)?;
    Ok((config, location))
}

pub fn scope_label(location: &ConfigLocation) -> &'static str {
    match location.scope {
        ConfigScope::Project => "project",
        ConfigScope::Global => "global",
    }
}

fn print_board(board: &Board) {
    if board.columns.is_empty() {
        println!("(no columns)");
        return;
    }
    for col in &board.columns {
        println!("{} [{}]", col.title, col.id);
        let mut empty = true;
        for task in board.tasks_in(&col.id) {
            println!("  - {}: {}", task.id, task.title);
            empty = false;
        }
        if empty {
            println!("  (empty)");
        }
        println!();
    }
}
