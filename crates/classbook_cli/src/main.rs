//! Classbook command-line front-end.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and open the data file.
//! - Run one command (`--exec`) or an interactive read-eval loop.

use clap::Parser;
use classbook_core::{
    init_logging, AddressBookRepository, AppConfig, ConfigOverrides,
    InMemoryAddressBookRepository, JsonAddressBookRepository, Logic,
};
use log::info;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line arguments for classbook
#[derive(Parser, Debug)]
#[command(name = "classbook")]
#[command(about = "Classroom roster with groups, attendance, and grading")]
#[command(version)]
struct Args {
    /// Config file (defaults to <config dir>/classbook/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON data file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Keep data in memory only; nothing is read or written
    #[arg(long)]
    ephemeral: bool,

    /// Run a single command and exit
    #[arg(long, value_name = "COMMAND")]
    exec: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let overrides = ConfigOverrides {
        config_file: args.config.clone(),
        data_file: args.data_file.clone(),
        log_level: args.log_level.clone(),
        log_dir: args.log_dir.clone(),
    };
    let config = match AppConfig::resolve(&overrides) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &absolute(&config.log_dir)) {
        eprintln!("warning: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok version={} ephemeral={}",
        classbook_core::core_version(),
        args.ephemeral
    );

    if args.ephemeral {
        let mut logic = Logic::load_or_empty(InMemoryAddressBookRepository::new());
        run(&mut logic, args.exec.as_deref())
    } else {
        let repo = JsonAddressBookRepository::new(config.data_file);
        let mut logic = Logic::load_or_empty(repo);
        run(&mut logic, args.exec.as_deref())
    }
}

fn run<R: AddressBookRepository>(logic: &mut Logic<R>, exec: Option<&str>) -> ExitCode {
    if let Some(line) = exec {
        return match logic.execute(line) {
            Ok(result) => {
                println!("{}", result.feedback);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    if let Some(path) = logic.repository().path() {
        println!("Classbook {} ({})", classbook_core::core_version(), path.display());
    } else {
        println!("Classbook {} (in memory)", classbook_core::core_version());
    }
    println!("Type \"help\" to see the list of commands.");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: cannot read input: {err}");
                return ExitCode::FAILURE;
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        match logic.execute(&line) {
            Ok(result) => {
                println!("{}", result.feedback);
                if result.exit {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    info!("event=cli_exit module=cli status=ok");
    ExitCode::SUCCESS
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
