use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sdui::codec;
use sdui::config::EngineConfig;
use sdui::logging::init_tracing;
use sdui::model::Node;
use sdui::style::{resolve, Dimension, ResolvedStyle};
use sdui::validation::{Severity, Validator};

#[derive(Parser)]
#[command(name = "sdui", version, about = "Validate, format and inspect server-driven UI documents")]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a document and report validation issues.
    Validate {
        /// Document path, or `-` for stdin.
        file: PathBuf,
        /// Print issues as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Decode a document and print it re-encoded.
    Format {
        file: PathBuf,
        #[arg(long)]
        compact: bool,
    },
    /// Print the tree outline with resolved styles.
    Inspect { file: PathBuf },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };
    init_tracing(&config.logging);

    match cli.command {
        Command::Validate { file, json } => run_validate(&config, &file, json),
        Command::Format { file, compact } => run_format(&file, compact),
        Command::Inspect { file } => run_inspect(&file),
    }
}

fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read document from stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn load_nodes(path: &Path) -> Result<Vec<Node>> {
    let text = read_document(path)?;
    codec::decode_list(&text).with_context(|| format!("Failed to decode '{}'", path.display()))
}

fn run_validate(config: &EngineConfig, path: &Path, json: bool) -> Result<ExitCode> {
    let nodes = load_nodes(path)?;
    let validator = Validator::new(config.validation.clone());

    let mut valid = true;
    let mut all_issues = Vec::new();
    for node in &nodes {
        let report = validator.validate(node);
        valid &= report.is_valid();
        all_issues.extend(report.into_issues());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all_issues)?);
    } else {
        for issue in &all_issues {
            println!("{}", issue);
        }
        let errors = all_issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warnings = all_issues.iter().filter(|i| i.severity == Severity::Warning).count();
        println!(
            "{}: {} node(s), {} error(s), {} warning(s)",
            path.display(),
            nodes.iter().map(Node::count).sum::<usize>(),
            errors,
            warnings
        );
    }

    Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_format(path: &Path, compact: bool) -> Result<ExitCode> {
    let nodes = load_nodes(path)?;
    let text = match (nodes.as_slice(), compact) {
        ([single], true) => codec::encode(single)?,
        ([single], false) => codec::encode_pretty(single)?,
        (many, true) => codec::encode_list(many)?,
        (many, false) => serde_json::to_string_pretty(many)?,
    };
    println!("{}", text);
    Ok(ExitCode::SUCCESS)
}

fn run_inspect(path: &Path) -> Result<ExitCode> {
    for root in load_nodes(path)? {
        root.walk(&mut |node, depth| {
            let style = resolve(node.style());
            let mut line = format!("{}{} #{}", "  ".repeat(depth), node.type_name(), node.id());
            if !node.is_visible() {
                line.push_str(" (hidden)");
            }
            let summary = style_summary(&style);
            if !summary.is_empty() {
                line.push_str(" [");
                line.push_str(&summary.join(" "));
                line.push(']');
            }
            if let Some(action) = node.action() {
                line.push_str(" -> ");
                line.push_str(action.type_name());
            }
            println!("{}", line);
        });
    }
    Ok(ExitCode::SUCCESS)
}

fn dimension_text(dimension: Dimension) -> String {
    match dimension {
        Dimension::Fill => "fill".to_string(),
        Dimension::Fraction(f) => format!("{}%", f * 100.0),
        Dimension::Dp(dp) => format!("{}dp", dp),
    }
}

fn style_summary(style: &ResolvedStyle) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(width) = style.width {
        parts.push(format!("w={}", dimension_text(width)));
    }
    if let Some(height) = style.height {
        parts.push(format!("h={}", dimension_text(height)));
    }
    if !style.padding.is_zero() {
        let p = style.padding;
        parts.push(format!("pad={},{},{},{}", p.top, p.end, p.bottom, p.start));
    }
    if !style.margin.is_zero() {
        let m = style.margin;
        parts.push(format!("margin={},{},{},{}", m.top, m.end, m.bottom, m.start));
    }
    if let Some(color) = style.background_color {
        parts.push(format!("bg=#{:08X}", color.to_argb_u32()));
    }
    if let Some(color) = style.text_color {
        parts.push(format!("fg=#{:08X}", color.to_argb_u32()));
    }
    if let Some(size) = style.font_size {
        parts.push(format!("font={}", size));
    }
    if let Some(weight) = style.font_weight {
        parts.push(format!("weight={}", weight.0));
    }
    if let Some(opacity) = style.opacity {
        parts.push(format!("opacity={}", opacity));
    }
    parts
}
