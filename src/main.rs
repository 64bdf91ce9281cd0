// src/main.rs

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use log::{error, info, warn};

use rawedit::config::{Config, CONFIG};
use rawedit::editor::{Editor, EditorStatus};
use rawedit::os::{query_window_size, RawMode, StdioTerminal, TerminalIo};
use rawedit::{keydump, renderer};

const USAGE: &str = "usage: rawedit [FILE]\n       rawedit --keys";

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Mode {
    Edit(Option<PathBuf>),
    KeyDump,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<Mode, String> {
    let mode = match args.next() {
        None => Mode::Edit(None),
        Some(arg) if arg == "--keys" => Mode::KeyDump,
        Some(arg) if arg == "-h" || arg == "--help" => return Err(USAGE.to_string()),
        Some(arg) => Mode::Edit(Some(PathBuf::from(arg))),
    };
    if args.next().is_some() {
        return Err(USAGE.to_string());
    }
    Ok(mode)
}

/// Logs go to a file, never to the terminal the editor is drawing on.
fn init_logging(config: &Config) {
    let Some(path) = config.log_file() else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
        return;
    };

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
            )
            .format_timestamp_micros()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        }
        Err(e) => eprintln!("rawedit: cannot open log file {}: {}", path.display(), e),
    }
}

/// Main entry point for `rawedit`.
fn main() -> ExitCode {
    let mode = match parse_args(std::env::args_os().skip(1)) {
        Ok(mode) => mode,
        Err(usage) => {
            eprintln!("{}", usage);
            return ExitCode::from(2);
        }
    };

    let config: &Config = &CONFIG;
    init_logging(config);
    info!("Starting rawedit in {:?} mode...", mode);

    let mut io = StdioTerminal::new();
    match run(mode, config, &mut io) {
        Ok(()) => {
            info!("rawedit exited successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal: {:#}", e);
            eprintln!("rawedit: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs one session in raw mode. The terminal is cleared and restored before
/// this returns, whatever the outcome.
fn run(mode: Mode, config: &Config, io: &mut StdioTerminal) -> anyhow::Result<()> {
    let mut raw_mode = match RawMode::enable_stdin(config.input.read_timeout()) {
        Ok(raw_mode) => raw_mode,
        Err(e) => {
            clear_screen_on_exit(io);
            return Err(e).context("Failed to enable raw mode");
        }
    };

    let clear_on_success = matches!(mode, Mode::Edit(_));
    let result = match mode {
        Mode::Edit(path) => edit(path, config, io),
        Mode::KeyDump => keydump::run(io).map(|_| ()).context("Key dump failed"),
    };

    if clear_on_success || result.is_err() {
        clear_screen_on_exit(io);
    }
    raw_mode.restore();
    result
}

fn clear_screen_on_exit(io: &mut StdioTerminal) {
    if let Err(e) = renderer::clear_screen(io) {
        warn!("Failed to clear the screen on exit: {}", e);
    }
}

fn edit(path: Option<PathBuf>, config: &Config, io: &mut StdioTerminal) -> anyhow::Result<()> {
    let (rows, cols) = query_window_size(io, config.input.size_probe_budget)
        .context("Failed to determine the terminal size")?;
    info!("Terminal size: {} rows x {} cols.", rows, cols);

    let mut editor = Editor::new(config, rows, cols);
    if let Some(path) = path {
        editor
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }

    loop {
        editor.refresh_screen(io).context("Failed to draw the screen")?;
        if editor.process_input(io).context("Failed to read input")? == EditorStatus::Quit {
            return Ok(());
        }
        if let Some((rows, cols)) = io.window_size().filter(|&(_, cols)| cols != 0) {
            editor.resize(rows as usize, cols as usize);
        }
    }
}
