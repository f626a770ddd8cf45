//! Command dispatch for the mirkit binary.

use std::path::PathBuf;

use crate::corpus::{DataError, Dataset};
use crate::datasets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Info,
    Validate,
    Download,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("list") => Some(Command::List),
        Some("info") => Some(Command::Info),
        Some("validate") => Some(Command::Validate),
        Some("download") => Some(Command::Download),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::List) => handle_list(),
        Some(Command::Info) => handle_info(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Download) => handle_download(args),
        None => {
            eprintln!("usage: mirkit <list|info|validate|download> [dataset] [options]");
            2
        }
    }
}

fn handle_list() -> i32 {
    for name in datasets::NAMES {
        println!("{name}");
    }
    0
}

/// `--data-home PATH`; `None` means the default root.
fn data_home_arg(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .position(|arg| arg == "--data-home")
        .and_then(|pos| args.get(pos + 1))
        .map(PathBuf::from)
}

fn open_dataset(args: &[String]) -> Result<Dataset, DataError> {
    let name = args.get(2).map(String::as_str).unwrap_or("");
    if name.is_empty() || name.starts_with("--") {
        return Err(DataError::UnknownDataset {
            name: "<missing>".to_string(),
        });
    }
    datasets::open(name, data_home_arg(args).as_deref())
}

fn handle_info(args: &[String]) -> i32 {
    let dataset = match open_dataset(args) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    println!("dataset: {}", dataset.name());
    match dataset.version() {
        Some(version) => println!("index version: {version}"),
        None => println!("index version: (legacy, unversioned)"),
    }
    println!("data home: {}", dataset.data_home().display());
    println!("tracks: {}", dataset.index().len());
    let roles: Vec<&str> = dataset.parsers().roles().collect();
    println!("annotation roles: {}", roles.join(", "));
    for remote in dataset.remotes() {
        println!("remote: {} <- {}", remote.name, remote.url);
    }
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let dataset = match open_dataset(args) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    let report = match dataset.validate(None) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    if args.iter().any(|arg| arg == "--json") {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize report: {err}");
                return 1;
            }
        }
    } else {
        println!("{}: {report}", dataset.name());
    }
    if report.is_clean() {
        0
    } else {
        1
    }
}

fn handle_download(args: &[String]) -> i32 {
    let dataset = match open_dataset(args) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    let force = args.iter().any(|arg| arg == "--force");
    let resources: Vec<&str> = args
        .iter()
        .enumerate()
        .filter(|(_, arg)| *arg == "--resource")
        .filter_map(|(pos, _)| args.get(pos + 1))
        .map(String::as_str)
        .collect();
    let selection = if resources.is_empty() {
        None
    } else {
        Some(resources.as_slice())
    };
    match dataset.download(selection, force) {
        Ok(report) => {
            println!("{}: {report}", dataset.name());
            0
        }
        Err(err) => {
            eprintln!("download failed: {err}");
            1
        }
    }
}
