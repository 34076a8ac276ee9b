//! This module defines the `Command` enum and its associated methods for parsing
//! the command line of the `fsutils` tool.
//!
//! Every `-v` flag raises the log verbosity and is otherwise ignored; the
//! remaining arguments select one of the info, tree, cat or help modes.

use std::path::PathBuf;

/// Usage text printed by `--help`.
pub const HELP: &str = "\
FSUTILS HELP
------------
fsutils is a tool that provides multiple utilities for analyzing EXT2 & FAT16 filesystems.
Usage: fsutils [OPTION] [FILESYSTEM PATH] [FILE NAME]

Options:
\t--info\t\tPrints the information of the filesystem.
\t--tree\t\tPrints the tree of the filesystem.
\t--cat\t\tPrints the content of a file.
\t--help\t\tPrints this help.
\t-v\t\tIncreases the log verbosity (repeatable).
";

const ERR_ARGS: &str =
    "Please, provide correct arguments for fsutils to work. Use --help for more info.";

/// Represents a command of the fsutils tool.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the metadata report of an image.
    Info(PathBuf),
    /// Print the directory tree of an image.
    Tree(PathBuf),
    /// Print the content of the first file with the given name.
    Cat(PathBuf, String),
    /// Print the usage text.
    Help,
    /// Command for invalid input, encapsulating an error message as a `String`.
    Invalid(String),
}

impl Command {
    /// Parses the arguments that follow the program name.
    ///
    /// # Returns
    /// - `Command::Help` for `--help` alone.
    /// - `Command::Info` / `Command::Tree` for the option followed by a path.
    /// - `Command::Cat` for `--cat` followed by a path and a file name.
    /// - `Command::Invalid` for any other combination.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let args: Vec<&str> = args
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|arg| !is_verbosity_flag(arg))
            .collect();

        match args.as_slice() {
            ["--help"] => Command::Help,
            ["--info", path] => Command::Info(PathBuf::from(path)),
            ["--tree", path] => Command::Tree(PathBuf::from(path)),
            ["--cat", path, name] => Command::Cat(PathBuf::from(path), name.to_string()),
            [] => Command::Invalid(ERR_ARGS.to_string()),
            [mode, ..] if !matches!(*mode, "--info" | "--tree" | "--cat" | "--help") => {
                Command::Invalid(format!("Unknown option {mode:?}. {ERR_ARGS}"))
            }
            _ => Command::Invalid(ERR_ARGS.to_string()),
        }
    }

    /// Image path the command operates on, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Command::Info(path) | Command::Tree(path) | Command::Cat(path, _) => Some(path),
            Command::Help | Command::Invalid(_) => None,
        }
    }
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v')
}

/// Counts the `-v` flags of the command line, `-vv` counting twice.
pub fn verbosity<S: AsRef<str>>(args: &[S]) -> usize {
    args.iter()
        .map(AsRef::<str>::as_ref)
        .filter(|arg| is_verbosity_flag(arg))
        .map(|arg| arg.len() - 1)
        .sum()
}
