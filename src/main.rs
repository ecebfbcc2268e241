use anyhow::Context;
use clap::{ArgAction, Parser};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use cfetch::art::{self, ArtSegment, builtin};
use cfetch::config::Configuration;
use cfetch::export::export_ascii;
use cfetch::info::{self, SystemInfo};
use cfetch::logging;
use cfetch::renderer::TerminalRenderer;

#[derive(Parser, Debug)]
#[command(name = "cfetch")]
#[command(author, version, about = "System information next to colored ASCII art")]
struct Args {
    /// Built-in art to draw instead of the configured one (see --list-art)
    #[arg(long, value_name = "NAME", conflicts_with = "ascii_file")]
    art: Option<String>,

    /// Draw art from a file, one segment per line
    #[arg(long, value_name = "FILE")]
    ascii_file: Option<PathBuf>,

    /// Print Rust source for an art file and exit
    #[arg(long = "ExportAscii", value_name = "FILE")]
    export_ascii: Option<PathBuf>,

    /// Config file (default: ~/.config/cfetch/config)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List built-in art names and exit
    #[arg(long)]
    list_art: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Rewrite `--<art name>` into `--art <art name>`.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut normalized = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        let legacy = arg
            .strip_prefix("--")
            .filter(|name| i > 0 && builtin::find(name).is_some())
            .map(str::to_string);
        match legacy {
            Some(name) => {
                normalized.push("--art".to_string());
                normalized.push(name);
            }
            None => normalized.push(arg),
        }
    }
    normalized
}

fn main() {
    let args = match Args::try_parse_from(normalize_args(env::args())) {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.export_ascii {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        export_ascii(&mut out, path)?;
        return Ok(());
    }

    if args.list_art {
        return list_art();
    }

    // Explicit --config must be readable; otherwise look in the default place
    let config = match &args.config {
        Some(path) => Configuration::load(path)?,
        None => Configuration::discover()?,
    };

    if args.dump_config {
        let json = serde_json::to_string_pretty(&config).context("failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    let segments = load_art(args, &config)?;
    let info = SystemInfo::new();
    TerminalRenderer::new(&config, &info)
        .render(&segments)
        .context("failed to write output")?;
    Ok(())
}

fn load_art(args: &Args, config: &Configuration) -> anyhow::Result<Vec<ArtSegment>> {
    if let Some(path) = &args.ascii_file {
        return Ok(art::load_file(path)?);
    }

    // An explicit --art must exist; a bad config value falls back to tux
    let distro = info::distro_id();
    let chosen = match &args.art {
        Some(name) => builtin::select(name, distro.as_deref())?,
        None => builtin::select_or_fallback(&config.ascii_art, distro.as_deref()),
    };
    log::info!("drawing {} (distro {:?})", chosen.name, distro);
    Ok(art::parse_all(chosen.segments))
}

fn list_art() -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Name first, then any aliases the legacy flags accept
    for art in builtin::BUILTIN {
        if art.aliases.is_empty() {
            writeln!(out, "{}", art.name)?;
        } else {
            writeln!(out, "{} ({})", art.name, art.aliases.join(", "))?;
        }
    }
    writeln!(out, "auto")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_legacy_art_flags() {
        assert_eq!(
            normalize_args(args(&["cfetch", "--arch-alt"])),
            args(&["cfetch", "--art", "arch-alt"])
        );
        assert_eq!(
            normalize_args(args(&["cfetch", "-v", "--rhel"])),
            args(&["cfetch", "-v", "--art", "rhel"])
        );
    }

    #[test]
    fn test_other_flags_untouched() {
        let raw = args(&[
            "cfetch",
            "--config",
            "x.conf",
            "--ExportAscii",
            "art.txt",
            "--art",
            "tux",
        ]);
        assert_eq!(normalize_args(raw.clone()), raw);
    }

    #[test]
    fn test_parse_art_flag() {
        let parsed = Args::try_parse_from(normalize_args(args(&["cfetch", "--debian"]))).unwrap();
        assert_eq!(parsed.art.as_deref(), Some("debian"));
        assert!(parsed.ascii_file.is_none());
    }

    #[test]
    fn test_parse_export_flag() {
        let parsed =
            Args::try_parse_from(args(&["cfetch", "--ExportAscii", "logo.txt"])).unwrap();
        assert_eq!(parsed.export_ascii, Some(PathBuf::from("logo.txt")));
    }

    #[test]
    fn test_art_conflicts_with_file() {
        let result =
            Args::try_parse_from(args(&["cfetch", "--art", "tux", "--ascii-file", "a.txt"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err =
            Args::try_parse_from(normalize_args(args(&["cfetch", "--windows"]))).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_verbose_counts() {
        let parsed = Args::try_parse_from(args(&["cfetch", "-vv"])).unwrap();
        assert_eq!(parsed.verbose, 2);
    }
}
