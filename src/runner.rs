//! Headless driver behind the `cellula` binary.

use crate::model::config::AppConfig;
use crate::model::simulation::{Simulation, Snapshot};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One symbol grid per generation
    Text,
    /// One JSON object per line and generation
    Json,
}

/// Loads `path`, falling back to the default configuration when it is missing.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    AppConfig::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
}

#[derive(Serialize)]
struct Frame<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    changed: usize,
    population: Vec<(&'static str, usize)>,
}

fn population_line(population: &[(&'static str, usize)]) -> String {
    population
        .iter()
        .map(|(symbol, n)| format!("{symbol}={n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_frame<W: Write>(sim: &Simulation, format: OutputFormat, out: &mut W) -> Result<()> {
    let snapshot = sim.snapshot();
    match format {
        OutputFormat::Text => {
            writeln!(out, "generation {}", snapshot.generation)?;
            write!(out, "{snapshot}")?;
            writeln!(out, "{}", population_line(&sim.population()))?;
        }
        OutputFormat::Json => {
            let frame = Frame {
                snapshot: &snapshot,
                changed: sim.changed_cells().len(),
                population: sim.population(),
            };
            serde_json::to_writer(&mut *out, &frame)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Advances `sim` by `generations`, printing every generation unless `quiet`
/// and a final population summary in text mode.
pub fn run<W: Write>(
    sim: &mut Simulation,
    generations: u64,
    format: OutputFormat,
    quiet: bool,
    out: &mut W,
) -> Result<()> {
    if !quiet {
        write_frame(sim, format, out)?;
    }
    for _ in 0..generations {
        sim.advance()?;
        if !quiet {
            write_frame(sim, format, out)?;
        }
    }

    if quiet {
        match format {
            OutputFormat::Text => writeln!(
                out,
                "generation {}: {}",
                sim.generation(),
                population_line(&sim.population())
            )?,
            OutputFormat::Json => write_frame(sim, format, out)?,
        }
    }

    sim.metrics().log_event(
        "run_complete",
        &format!(
            "{} generations in {:?}, {} cells",
            sim.generation(),
            sim.metrics().elapsed(),
            sim.len()
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(1);
        config.grid.rows = 4;
        config.grid.columns = 4;
        Simulation::from_config(&config).unwrap()
    }

    #[test]
    fn test_text_output() {
        let mut sim = sim();
        let mut out = Vec::new();
        run(&mut sim, 2, OutputFormat::Text, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("generation").count(), 3);
        assert!(text.contains("generation 2"));
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_json_lines() {
        let mut sim = sim();
        let mut out = Vec::new();
        run(&mut sim, 1, OutputFormat::Json, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["generation"], 1);
        assert_eq!(last["cells"].as_array().unwrap().len(), 16);
        assert_eq!(last["family"], "Conway");
    }

    #[test]
    fn test_quiet_prints_summary_only() {
        let mut sim = sim();
        let mut out = Vec::new();
        run(&mut sim, 3, OutputFormat::Text, true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("generation 3: A="));
    }

    #[test]
    fn test_missing_config_falls_back() {
        let config = load_config(Path::new("/nonexistent/cellula.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
