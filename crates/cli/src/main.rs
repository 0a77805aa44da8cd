mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use ladder_logic_core::{
    EmitConfig, LadderError, Program, build_trees, compile, decompile_with_config,
    to_pretty_json,
};
use ladder_logic_diagnostics as diag;
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use crate::render::{Format, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ladder",
    version,
    about = "Ladder logic toolchain: compile ASCII relay-ladder schematics to stack instructions and draw them back"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Increase log verbosity on stderr (-v debug, -vv trace).
    #[arg(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Schematic analysis ──────────────────────────────────────────
    /// Compile a schematic and print its instruction sequence.
    Compile {
        /// Schematic file, or `-` for stdin.
        file: String,
    },

    /// Syntax-check a schematic.
    Check {
        /// Schematic file, or `-` for stdin.
        file: String,
    },

    /// Compile a schematic and print one expression tree per coil.
    Tree {
        /// Schematic file, or `-` for stdin.
        file: String,
    },

    // ── Rendering ───────────────────────────────────────────────────
    /// Draw a JSON instruction sequence as a schematic.
    Decompile {
        /// JSON instruction file, or `-` for stdin.
        file: String,
        /// Minimum content width of every schematic row.
        #[arg(long, default_value_t = 0)]
        width: usize,
    },

    /// Redraw a schematic in canonical form.
    Format {
        /// Schematic file, or `-` for stdin.
        file: String,
        /// Write the redrawn schematic back to the file (in-place).
        #[arg(long, short, conflicts_with = "check")]
        write: bool,
        /// Check if the file is already in canonical form (exit 1 if not). For CI.
        #[arg(long, conflicts_with = "write")]
        check: bool,
        /// Minimum content width of every schematic row.
        #[arg(long, default_value_t = 0)]
        width: usize,
    },

    // ── Reference ───────────────────────────────────────────────────
    /// Explain a diagnostic ID (e.g. LL1002).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Compile { file } => cmd_compile(&file, format)?,
        Cmd::Check { file } => cmd_check(&file, format)?,
        Cmd::Tree { file } => cmd_tree(&file, format)?,
        Cmd::Decompile { file, width } => cmd_decompile(&file, width, format)?,
        Cmd::Format {
            file,
            write,
            check,
            width,
        } => cmd_format(&file, write, check, width, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_compile(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let program = compile_or_exit(&input, file, format);

    match format {
        Format::Json => println!("{}", serde_json::to_string(&program)?),
        Format::Pretty => {
            for instruction in &program {
                println!("{instruction}");
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckReport {
    ok: bool,
    rungs: usize,
    instructions: usize,
}

fn cmd_check(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let program = compile_or_exit(&input, file, format);
    let report = CheckReport {
        ok: true,
        rungs: ladder_logic_core::split_rungs(&input).len(),
        instructions: program.len(),
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Pretty => eprintln!("syntax ok"),
    }
    Ok(())
}

fn cmd_tree(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let program = compile_or_exit(&input, file, format);
    let coils = build_trees(&program).unwrap_or_else(|err| fail(&input, file, &err, format));
    println!("{}", to_pretty_json(&coils));
    Ok(())
}

fn cmd_decompile(file: &str, width: usize, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let program: Program = serde_json::from_str(&input)
        .with_context(|| format!("failed to read instruction sequence from '{file}'"))?;
    tracing::debug!(instructions = program.len(), "loaded instruction sequence");

    let config = EmitConfig { min_width: width };
    let drawn = decompile_with_config(&program, &config)
        .unwrap_or_else(|err| fail(&input, file, &err, format));
    println!("{drawn}");
    Ok(())
}

fn cmd_format(file: &str, write: bool, check: bool, width: usize, format: Format) -> Result<()> {
    if write && file == "-" {
        anyhow::bail!("--write needs a file path, not stdin");
    }
    let input = read_input(file)?;
    let program = compile_or_exit(&input, file, format);

    let config = EmitConfig { min_width: width };
    let mut formatted = decompile_with_config(&program, &config)
        .unwrap_or_else(|err| fail(&input, file, &err, format));
    formatted.push('\n');

    let already_formatted = formatted == input;

    if check {
        status_message(
            format,
            already_formatted,
            "already formatted",
            "not formatted",
            file,
        );
        if !already_formatted {
            process::exit(1);
        }
    } else if write {
        if !already_formatted {
            fs::write(file, &formatted).with_context(|| format!("failed to write '{file}'"))?;
        }
        status_message(
            format,
            !already_formatted,
            "formatted",
            "already formatted",
            file,
        );
    } else {
        // Default: print the redrawn schematic to stdout.
        print!("{formatted}");
    }

    Ok(())
}

/// Emit a status message for --check / --write in the appropriate format.
fn status_message(format: Format, condition: bool, if_true: &str, if_false: &str, file: &str) {
    let msg = if condition { if_true } else { if_false };
    match format {
        Format::Json => {
            let out = serde_json::json!({ "status": msg, "file": file });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).expect("status JSON serialization cannot fail")
            );
        }
        Format::Pretty => {
            eprintln!("{msg}: {file}");
        }
    }
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let text = diag::explain(id);
            let out = serde_json::json!({
                "id": id,
                "explanation": text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // The explanation is the command output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read a file, or stdin when `file` is `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read '{file}'"))
}

/// Compile `input`, or report the syntax error and exit 1.
fn compile_or_exit(input: &str, file: &str, format: Format) -> Program {
    compile(input).unwrap_or_else(|err| fail(input, file, &err, format))
}

/// Report a fatal error as a diagnostic and exit 1.
fn fail(source: &str, file: &str, err: &LadderError, format: Format) -> ! {
    let diagnostics = [err.to_diagnostic()];
    render_diagnostics(source, file, &diagnostics, format);
    if format == Format::Pretty {
        print_summary(&diagnostics);
    }
    process::exit(1);
}
