// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Urkunde: batch generator for the certificate and report catalogue.
//
// Entry point. Initialises logging, loads configuration and assets once, and
// hands the catalogue to the batch service.

mod services;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use urkunde_core::LayoutConfig;
use urkunde_core::error::Result;
use urkunde_document::{AssetBundle, ContentCatalog, DocumentGenerator, Stamp, ThemeRegistry};

use services::batch::{self, BatchOptions};
use services::{catalog, data_dir};

#[derive(Parser, Debug)]
#[command(name = "urkunde")]
#[command(version)]
#[command(about = "Generate the certificate and report catalogue as PDF", long_about = None)]
struct Cli {
    /// TrueType/OpenType font used for all text
    #[arg(long, env = "URKUNDE_FONT", value_name = "FILE")]
    font: PathBuf,

    /// Institution logo drawn in the header (optional)
    #[arg(long, env = "URKUNDE_LOGO", value_name = "FILE")]
    logo: Option<PathBuf>,

    /// Official seal drawn beside the signatory (optional)
    #[arg(long, env = "URKUNDE_SEAL", value_name = "FILE")]
    seal: Option<PathBuf>,

    /// Primary output directory
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Second directory receiving a copy of every file
    #[arg(long, value_name = "DIR")]
    mirror_dir: Option<PathBuf>,

    /// Layout configuration overrides (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content catalogue replacing the built-in one (JSON)
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Theme overrides per template family (JSON)
    #[arg(long, value_name = "FILE")]
    themes: Option<PathBuf>,

    /// Only generate these template ids (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "ID")]
    only: Vec<String>,

    /// Stamp this name into the student-name field
    #[arg(long)]
    student_name: Option<String>,

    /// Stamp this date into the issue-date field (defaults to today when a
    /// name is stamped)
    #[arg(long)]
    issue_date: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Urkunde starting");

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            if e.is_entry_local() {
                error!(error = %e, "batch failed");
            } else {
                error!(error = %e, "configuration or font error, nothing generated");
            }
            ExitCode::from(2)
        }
    }
}

/// Returns whether every entry was written.
fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => LayoutConfig::from_file(path)?,
        None => LayoutConfig::default(),
    };
    let themes = themes(cli.themes.as_deref())?;
    let content = match &cli.content {
        Some(path) => ContentCatalog::from_file(path)?,
        None => ContentCatalog::builtin()?,
    };
    let generator = DocumentGenerator::new(config, themes, content)?;
    let assets = AssetBundle::load(&cli.font, cli.logo.as_deref(), cli.seal.as_deref())?;
    let templates = catalog::select(&cli.only)?;

    let options = BatchOptions {
        out_dir: match cli.out_dir {
            Some(dir) => dir,
            None => data_dir::data_subdir("certificates")?,
        },
        mirror_dir: match cli.mirror_dir {
            Some(dir) => dir,
            None => data_dir::data_subdir("archive")?,
        },
        stamp: stamp(cli.student_name, cli.issue_date),
    };
    info!(
        entries = templates.len(),
        out = %options.out_dir.display(),
        mirror = %options.mirror_dir.display(),
        "generating catalogue"
    );

    let manifest = batch::run(&generator, &assets, &templates, &options)?;
    Ok(manifest.is_complete())
}

/// Built-in palettes, with any families in `path` replaced.
fn themes(path: Option<&Path>) -> Result<ThemeRegistry> {
    let defaults = ThemeRegistry::default();
    match path {
        Some(path) => Ok(defaults.with_overrides(ThemeRegistry::from_file(path)?)),
        None => Ok(defaults),
    }
}

fn stamp(student_name: Option<String>, issue_date: Option<String>) -> Option<Stamp> {
    if student_name.is_none() && issue_date.is_none() {
        return None;
    }
    Some(Stamp {
        student_name: student_name.unwrap_or_default(),
        issue_date: issue_date
            .unwrap_or_else(|| chrono::Local::now().format("%Y. %m. %d.").to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn only_accepts_comma_separated_ids() {
        let cli = Cli::try_parse_from([
            "urkunde",
            "--font",
            "font.ttf",
            "--only",
            "assessment,opinion",
        ])
        .unwrap();
        assert_eq!(cli.only, vec!["assessment", "opinion"]);
    }

    #[test]
    fn theme_file_overrides_the_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("themes.json");
        std::fs::write(
            &path,
            r#"{ "reflection": {
                "primary":    { "r": 1, "g": 1, "b": 1 },
                "secondary":  { "r": 2, "g": 2, "b": 2 },
                "border":     { "r": 3, "g": 3, "b": 3 },
                "accent":     { "r": 4, "g": 4, "b": 4 },
                "background": { "r": 5, "g": 5, "b": 5 }
            } }"#,
        )
        .unwrap();

        let registry = themes(Some(&path)).unwrap();
        registry.check_complete().unwrap();
        let reflection = registry
            .theme_for(urkunde_core::types::TemplateFamily::Reflection)
            .unwrap();
        assert_eq!(reflection.primary, urkunde_core::types::Color::rgb(1, 1, 1));
        assert!(DocumentGenerator::new(
            LayoutConfig::default(),
            registry,
            ContentCatalog::builtin().unwrap()
        )
        .is_ok());
    }

    #[test]
    fn no_stamp_without_values() {
        assert_eq!(stamp(None, None), None);
    }

    #[test]
    fn name_alone_stamps_todays_date() {
        let stamp = stamp(Some("홍길동".into()), None).unwrap();
        assert_eq!(stamp.student_name, "홍길동");
        assert!(!stamp.issue_date.is_empty());
    }
}
