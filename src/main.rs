// File: src/main.rs
// Thin line-reading shell around the session core.
use anyhow::Result;
use simplelog::{LevelFilter, WriteLogger};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskline::cli;
use taskline::config::Config;
use taskline::context::{AppContext, StandardContext};
use taskline::session::Session;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        cli::print_help();
        return Ok(());
    }

    let ctx = StandardContext::new(parse_root_flag(&args));
    init_logging(&ctx);

    let config = match Config::load(&ctx) {
        Ok(config) => config,
        Err(e) => {
            // A broken config should not lock the user out of their tasks.
            eprintln!("{e}");
            eprintln!("Continuing with default settings.");
            Config::default()
        }
    };

    let mut session = Session::new(&ctx, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", Session::greeting())?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let reply = session.respond(&line?);
        writeln!(out, "{reply}")?;
        if session.is_exiting() {
            break;
        }
    }

    Ok(())
}

fn parse_root_flag(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--root" || arg == "-r" {
            return iter.next().map(PathBuf::from);
        }
    }
    None
}

/// Best-effort file logging; the tracker still works without a log file.
fn init_logging(ctx: &dyn AppContext) {
    if let Ok(path) = ctx.get_log_file_path()
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file);
    }
}
