//! This is the main entry point for the fsutils tool.
//!
//! The program inspects an EXT2 or FAT16 image: it prints its metadata, its
//! directory tree, or the content of one of its files.

use fsutils::Volume;
use fsutils::commands::{self, Command, HELP};
use fsutils::volume::VolumeError;
use log::{debug, error};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(err) = stderrlog::new()
        .module(module_path!())
        .verbosity(1 + commands::verbosity(&args))
        .init()
    {
        eprintln!("Logger initialisation failed: {err}");
    }

    let cmd = Command::from_args(&args);
    if let Some(path) = cmd.path() {
        debug!("Inspecting {}", path.display());
    }

    let result = match cmd {
        Command::Help => {
            println!("\n{HELP}");
            Ok(())
        }
        Command::Invalid(msg) => {
            error!("{msg}");
            return ExitCode::FAILURE;
        }
        Command::Info(path) => Volume::open(&path).and_then(|vol| {
            println!("{}", vol.info()?);
            Ok(())
        }),
        Command::Tree(path) => Volume::open(&path).and_then(|mut vol| {
            println!("\n{}", vol.tree()?);
            Ok(())
        }),
        Command::Cat(path, name) => Volume::open(&path).and_then(|mut vol| {
            let content = vol.cat(&name)?;
            write_content(&name, &content);
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // A missing file is reported but does not fail the run.
        Err(err @ VolumeError::FileNotFound(_)) => {
            error!("{err}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn write_content(name: &str, content: &[u8]) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout.write_all(content).and_then(|()| stdout.flush()) {
        error!("Cannot write the content of {name}: {err}");
    }
}
