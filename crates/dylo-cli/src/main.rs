//! dylo - List the architectures, linked libraries and rpaths of Mach-O binaries
//!
//! This tool decodes thin and fat (universal) Mach-O files and prints,
//! per architecture slice, the install name, the linked libraries and
//! the runtime search paths declared in the load commands.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dylo_core::{inspect_file, SliceReport};
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

/// List the architectures, linked libraries and rpaths of Mach-O binaries
#[derive(Parser, Debug)]
#[command(name = "dylo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Mach-O files to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // One bad input never stops the run; each path stands alone.
    for path in &cli.paths {
        match inspect_file(path) {
            Ok(reports) => print!("{}", render_report(path, &reports)),
            Err(e) => error!("{}", e),
        }
        println!();
    }

    Ok(())
}

/// Renders the decoded slice reports of one file.
///
/// Pure presentation: everything rendered arrives through [`SliceReport`],
/// never by re-reading the binary.
fn render_report(path: &Path, reports: &[SliceReport]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        "- filename:".blue().bold(),
        path.display()
    );
    let _ = writeln!(out, "{}", "  info:".blue().bold());

    for report in reports {
        let _ = writeln!(out, "{} {}", "  - arch:".green().bold(), report.arch);
        if let Some(id) = &report.dylib_id {
            let _ = writeln!(out, "{} {}", "    dylib_id:".green().bold(), id);
        }
        let _ = writeln!(out, "{}", "    deps:".green().bold());
        for dep in &report.dependencies {
            let _ = writeln!(out, "    - {}", dep);
        }
        let _ = writeln!(out, "{}", "    rpaths:".green().bold());
        for rpath in &report.rpaths {
            let _ = writeln!(out, "    - {}", rpath);
        }
    }

    out
}
