//! fh - plan fastener hole cuts from the terminal
//!
//! Runs the Cut Fastener Hole command against an in-memory demo block and
//! prints the resulting cuts and history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fh_cad::{ExtrudeDirection, MemoryHost};
use fh_core::{
    AnchorKind, CutFastenerHole, CutPlan, CutReport, FastenerConfig, HeadKind, StartReference,
    Termination, constants,
};
use glam::Vec2;

mod demo;

use demo::DemoPart;

#[derive(Parser)]
#[command(name = "fh")]
#[command(about = constants::COMMAND_DESCRIPTION, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fastener sizes
    Sizes {
        /// Configuration file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Plan the cuts for a hole through a demo block
    Plan {
        /// Fastener size key (default from configuration)
        #[arg(short, long)]
        size: Option<String>,
        /// Head style: "Socket" or "None"
        #[arg(long)]
        head: Option<HeadKind>,
        /// Anchor style: "Hex Nut" or "None"
        #[arg(long)]
        anchor: Option<AnchorKind>,
        /// Put the nut at the point and the head at the face
        #[arg(short, long)]
        invert: bool,
        /// Block height in mm
        #[arg(long, default_value_t = 20.0)]
        height: f32,
        /// Configuration file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print or write the default configuration
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fh_core=info,fh_cad=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!("Starting {}", constants::COMMAND_NAME);

    match cli.command {
        Commands::Sizes { config } => {
            show_sizes(&load_config(config.as_deref())?)?;
        }
        Commands::Plan {
            size,
            head,
            anchor,
            invert,
            height,
            config,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let mut inputs = config.default_inputs();
            if let Some(size) = size {
                inputs = inputs.with_size(size);
            }
            if let Some(head) = head {
                inputs.head = head;
            }
            if let Some(anchor) = anchor {
                inputs.anchor = anchor;
            }
            inputs.invert |= invert;

            let mut part = DemoPart::block(height, Vec2::ZERO)?;
            inputs.points.push(part.point);
            inputs.faces.push(part.face);

            let report = CutFastenerHole::from_config(&config).run(
                &mut part.host,
                &inputs,
                &config.catalog()?,
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&part, &report);
            }
        }
        Commands::Config { write } => {
            let config = FastenerConfig::default();
            match write {
                Some(path) => {
                    config
                        .save(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", String::from_utf8(config.to_bytes()?)?),
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FastenerConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            FastenerConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))
        }
        None => Ok(FastenerConfig::default()),
    }
}

fn show_sizes(config: &FastenerConfig) -> Result<()> {
    let catalog = config.catalog()?;
    println!(
        "{:<6} {:>6} {:>8} {:>8} {:>8} {:>8}",
        "size", "bore", "socket", "depth", "nut", "depth"
    );
    for entry in catalog.entries() {
        let s = &entry.spec;
        let marker = if entry.key == config.defaults.size { "*" } else { "" };
        println!(
            "{:<6} {:>6.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {}",
            entry.key.as_str(),
            s.bore_diameter,
            s.socket_diameter,
            s.socket_length,
            s.hex_nut_diameter,
            s.hex_nut_length,
            marker
        );
    }
    Ok(())
}

fn describe(plan: &CutPlan) -> String {
    let start = match plan.start {
        StartReference::PointPlane(_) => "point plane",
        StartReference::Face(_) => "face",
    };
    let sign = match plan.direction {
        ExtrudeDirection::Positive => "+",
        ExtrudeDirection::Negative => "-",
    };
    let extent = match plan.termination {
        Termination::ToFace(_) => "to face".to_string(),
        Termination::Distance(d) => format!("{}{:.2} mm", sign, d),
    };
    format!("from {:<11} {}", start, extent)
}

fn print_report(part: &DemoPart, report: &CutReport) {
    println!("{}:", constants::COMMAND_NAME);
    for cut in &report.cuts {
        println!("  {:<6} {:<10} {}", cut.kind, cut.plan.name, describe(&cut.plan));
    }
    print_history(&part.host);
}

fn print_history(host: &MemoryHost) {
    let timeline = host.timeline();
    println!("History:");
    for (index, entry) in timeline.entries().iter().enumerate() {
        let group = timeline
            .groups()
            .iter()
            .find(|g| g.contains(index))
            .map(|g| format!("[{}]", g.name))
            .unwrap_or_default();
        let kind = format!("{:?}", entry.kind);
        println!("  {:>2} {:<9} {:<12} {}", index, kind, entry.name, group);
    }
}
