//! Interactive roster picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `noten grade` and choose a class list" UX
//!
//! The picker searches for `*.csv` files under the current working directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Directory recursion depth for finding roster files.
const SEARCH_DEPTH: usize = 3;

/// Prompt the user to select a roster CSV from the current directory tree.
///
/// Accepts a number from the printed list or an explicit path; `q` cancels.
pub fn prompt_for_roster_path() -> Result<PathBuf, AppError> {
    let files = discover_csv_files();
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Pass one with `noten grade -f <file.csv>` or create one with `noten sample`.",
        ));
    }

    println!("Found {} CSV file(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, path.display());
    }

    loop {
        print!("Roster [1-{}, path, or q]: ", files.len());
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Pass a roster with `noten grade -f <file.csv>`.",
            ));
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        let candidate = match input.parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => files[n - 1].clone(),
            Ok(n) => {
                println!("Invalid choice: {n}.");
                continue;
            }
            Err(_) => PathBuf::from(input),
        };

        match validate_csv_path(&candidate) {
            Ok(path) => return Ok(path),
            Err(err) => println!("{err}"),
        }
    }
}

/// Validate that the provided path points to an existing `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.is_file() {
        return Err(AppError::new(
            2,
            format!("Not a readable file: {}", path.display()),
        ));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(
            2,
            format!("Expected a .csv file, got: {}", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

/// Discover `*.csv` files under the current directory (deterministic order).
pub fn discover_csv_files() -> Vec<PathBuf> {
    let mut pending = vec![(PathBuf::from("."), 0usize)];
    let mut out = Vec::new();

    while let Some((dir, depth)) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                if depth < SEARCH_DEPTH && !should_skip_dir(&path) {
                    pending.push((path, depth + 1));
                }
            } else if file_type.is_file() && has_csv_extension(&path) {
                out.push(path.strip_prefix("./").unwrap_or(&path).to_path_buf());
            }
        }
    }

    out.sort();
    out
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}
