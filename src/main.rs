use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use people_table::{
    commands::{Command, PROMPT, Session},
    errors::PeopleError,
    printer::separator,
};

/// Looked up in the working directory when no path is given.
const DATA_FILE_NAME: &str = "Data.csv";

#[derive(Parser, Debug)]
#[command(author, version, about = "Loads a CSV of people and answers one query about them.", long_about = None)]
struct Args {
    /// Path to the CSV file with `id,name,age,weight` rows; the last one wins
    #[arg(allow_hyphen_values = true)]
    paths: Vec<PathBuf>,
}

impl Args {
    fn path(&self) -> Option<&Path> {
        self.paths.last().map(PathBuf::as_path)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PeopleError>() {
                Some(err) => println!("{err}"),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let path = match args.path() {
        Some(path) => path.to_path_buf(),
        None => resolve_path(&mut input, &mut out)?,
    };
    info!("reading people from {}", path.display());

    let raw = read_file(&path)?;
    writeln!(out, "{raw}")?;
    write!(out, "{}", separator())?;

    let session = Session::load(&raw)?;
    session.write_report(&mut out)?;

    write!(out, "{PROMPT}")?;
    out.flush()?;
    let line = read_line(&mut input)?;
    writeln!(out)?;

    let command = Command::parse(&line)?;
    session.execute(&command, &mut out)?;
    out.flush()?;

    Ok(())
}

fn resolve_path(input: &mut impl BufRead, out: &mut impl Write) -> Result<PathBuf> {
    if Path::new(DATA_FILE_NAME).is_file() {
        return Ok(PathBuf::from(DATA_FILE_NAME));
    }

    write!(out, "Enter path to the CSV file:\npath> ")?;
    out.flush()?;
    let path = read_line(input)?;
    writeln!(out)?;

    Ok(PathBuf::from(path))
}

/// Reads one line without its line terminator.
fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read from stdin")?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Reads the whole file with `\r\n` and `\r` line endings turned into `\n`.
fn read_file(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => anyhow::Error::from(PeopleError::InputNotFound),
        _ => anyhow::Error::from(e).context(format!("failed to read {}", path.display())),
    })?;
    debug!("read {} bytes from {}", raw.len(), path.display());

    Ok(raw.replace("\r\n", "\n").replace('\r', "\n"))
}
