// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// urkunde-document: Certificate and report generation for Urkunde.
//
// Provides the page-flow layout engine, per-family themes, the fixed overlay
// fields, template content, document assembly, and PDF rendering.

pub mod assemble;
pub mod assets;
pub mod content;
pub mod layout;
pub mod overlay;
pub mod pdf;
pub mod theme;

// Re-export the primary types so callers can use `urkunde_document::DocumentGenerator` etc.
pub use assemble::{BuildRequest, BuilderRegistry, ContentBuilder, DocumentGenerator};
pub use assets::{AssetBundle, DecodedImage};
pub use content::{ContentBlock, ContentCatalog, DocumentContent};
pub use layout::{Document, DrawCommand, LayoutEngine, Page, wrap};
pub use overlay::{OverlayField, OverlayFieldPlanner, OverlayLabels};
pub use pdf::{PdfRenderer, Stamp};
pub use theme::{Theme, ThemeRegistry};
