use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing::info;

use kvmdeps::core::{build_graph, DependencyAnalyzer, GraphDirection};
use kvmdeps::formatters::{DotFormatter, JsonFormatter, Layout, TextReportFormatter};
use kvmdeps::logging;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "kvmdeps",
    version = "0.1.0",
    author = "kvmdeps developers",
    about = "Map KVM references across API proxy bundles"
)]
struct Cli {
    /// JSON array of KVM names, e.g. '["kvm1", "kvm2"]'
    #[arg(value_name = "KVM_LIST")]
    keys: String,

    /// Directory whose subdirectories are proxy bundles
    #[arg(value_name = "PROXY_DIR_PATH")]
    proxy_dir: PathBuf,

    /// Output format: text, json, dot
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Mapping drawn by the dot format
    #[arg(short, long, value_enum, default_value_t = Direction::Forward)]
    graph: Direction,

    /// Force-directed layout engine for the dot format
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Fdp)]
    layout: LayoutArg,

    /// Include scan statistics in JSON output
    #[arg(long)]
    stats: bool,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); KVMDEPS_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Text,
    Json,
    Dot,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LayoutArg {
    Fdp,
    Neato,
    Sfdp,
}

impl From<Direction> for GraphDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => GraphDirection::Forward,
            Direction::Reverse => GraphDirection::Reverse,
        }
    }
}

impl From<LayoutArg> for Layout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Fdp => Layout::Fdp,
            LayoutArg::Neato => Layout::Neato,
            LayoutArg::Sfdp => Layout::Sfdp,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        if err.use_stderr() {
            let _ = err.print();
            process::exit(1);
        }
        err.exit()
    });
    logging::init_tracing(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        keys,
        proxy_dir,
        format,
        graph,
        layout,
        stats,
        output,
        verbose: _,
    } = cli;

    let start_time = Instant::now();

    let analyzer = DependencyAnalyzer::new();
    let index = analyzer.find_dependencies(&keys, &proxy_dir)?;

    let rendered = match format {
        OutputFormat::Text => TextReportFormatter::new().format(&index)?,
        OutputFormat::Json => JsonFormatter::new().with_stats(stats).format(&index)?,
        OutputFormat::Dot => {
            let direction = GraphDirection::from(graph);
            let name = match direction {
                GraphDirection::Forward => "proxy_to_kvm",
                GraphDirection::Reverse => "kvm_to_proxy",
            };
            DotFormatter::new()
                .with_layout(layout.into())
                .with_name(name)
                .format(&build_graph(&index, direction))?
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(output = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_positionals_are_required() {
        assert!(Cli::try_parse_from(["kvmdeps", "[]"]).is_err());
        assert!(Cli::try_parse_from(["kvmdeps", "[]", "dir", "extra"]).is_err());
        let cli = Cli::try_parse_from(["kvmdeps", r#"["a"]"#, "proxies"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.graph, Direction::Forward);
    }

    #[test]
    fn dot_options_parse() {
        let cli = Cli::try_parse_from([
            "kvmdeps", "[]", "proxies", "-f", "dot", "-g", "reverse", "-l", "neato", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Dot);
        assert_eq!(cli.graph, Direction::Reverse);
        assert_eq!(cli.layout, LayoutArg::Neato);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.stats);
    }
}
