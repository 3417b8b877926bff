// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch service: generates the catalogue in parallel and writes every file
// to both destination directories.
//
// Generation is a pure function of (template, shared config, shared assets),
// so entries fan out over rayon's pool with no locking. Each worker owns its
// renderer; the generator and asset bundle are shared read-only. A failed
// entry is recorded in the manifest and never stops the others.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::Template;
use urkunde_document::{AssetBundle, Document, DocumentGenerator, PdfRenderer, Stamp};

/// File name of the run manifest, written next to the documents.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Turns a laid-out document into output bytes.
pub trait Render {
    fn render(&self, document: &Document, stamp: Option<&Stamp>) -> Result<Vec<u8>>;
}

impl Render for PdfRenderer<'_> {
    fn render(&self, document: &Document, stamp: Option<&Stamp>) -> Result<Vec<u8>> {
        PdfRenderer::render(self, document, stamp)
    }
}

/// Where a run writes and what it stamps.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub out_dir: PathBuf,
    pub mirror_dir: PathBuf,
    pub stamp: Option<Stamp>,
}

impl BatchOptions {
    fn destinations(&self) -> [&Path; 2] {
        [self.out_dir.as_path(), self.mirror_dir.as_path()]
    }
}

/// One written document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub file: String,
    pub pages: usize,
    pub fingerprint: String,
}

/// One entry that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub id: String,
    pub error: String,
}

/// Record of a batch run, in catalogue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ManifestEntry>,
    pub failures: Vec<FailedEntry>,
}

impl Manifest {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate, render, and write every template.
///
/// The font is parsed once up front: an unusable font fails the whole run
/// before any file is written.
#[instrument(skip_all, fields(entries = templates.len()))]
pub fn run(
    generator: &DocumentGenerator,
    assets: &AssetBundle,
    templates: &[Template],
    options: &BatchOptions,
) -> Result<Manifest> {
    PdfRenderer::new(generator.config(), assets)?;
    run_with(generator, assets, templates, options, || {
        PdfRenderer::new(generator.config(), assets)
    })
}

/// Batch loop over any renderer. `make_renderer` runs once per worker.
pub fn run_with<R, F>(
    generator: &DocumentGenerator,
    assets: &AssetBundle,
    templates: &[Template],
    options: &BatchOptions,
    make_renderer: F,
) -> Result<Manifest>
where
    R: Render,
    F: Fn() -> Result<R> + Sync + Send,
{
    for dir in options.destinations() {
        std::fs::create_dir_all(dir)?;
    }

    let results: Vec<(Template, Result<ManifestEntry>)> = templates
        .par_iter()
        .map_init(make_renderer, |renderer, template| {
            let result = match renderer {
                Ok(renderer) => produce(generator, renderer, assets, template, options),
                Err(err) => Err(UrkundeError::PdfError(format!(
                    "renderer unavailable: {err}"
                ))),
            };
            (*template, result)
        })
        .collect();

    let mut manifest = Manifest {
        generated_at: Utc::now(),
        entries: Vec::with_capacity(results.len()),
        failures: Vec::new(),
    };
    for (template, result) in results {
        match result {
            Ok(entry) => manifest.entries.push(entry),
            Err(err) => {
                error!(%template, error = %err, "entry failed");
                manifest.failures.push(FailedEntry {
                    id: template.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    let json = serde_json::to_vec_pretty(&manifest)?;
    write_copies(&json, MANIFEST_FILE, options)?;
    info!(
        written = manifest.entries.len(),
        failed = manifest.failures.len(),
        "batch finished"
    );
    Ok(manifest)
}

fn produce<R: Render>(
    generator: &DocumentGenerator,
    renderer: &R,
    assets: &AssetBundle,
    template: &Template,
    options: &BatchOptions,
) -> Result<ManifestEntry> {
    let document = generator.generate(template, assets)?;
    let bytes = renderer.render(&document, options.stamp.as_ref())?;
    let file = format!("{}.pdf", template.file_stem());
    write_copies(&bytes, &file, options)?;
    Ok(ManifestEntry {
        id: template.to_string(),
        file,
        pages: document.page_count(),
        fingerprint: document.fingerprint()?,
    })
}

fn write_copies(bytes: &[u8], file_name: &str, options: &BatchOptions) -> Result<()> {
    for dir in options.destinations() {
        std::fs::write(dir.join(file_name), bytes)?;
    }
    Ok(())
}
