// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Urkunde.

use thiserror::Error;

use crate::types::TemplateFamily;

/// Top-level error type for all Urkunde operations.
#[derive(Debug, Error)]
pub enum UrkundeError {
    // -- Configuration errors --
    #[error("unknown template id: {0}")]
    UnknownTemplate(String),

    #[error("no theme registered for template family {0}")]
    UnknownTheme(TemplateFamily),

    #[error("no content builder registered for template family {0}")]
    MissingBuilder(TemplateFamily),

    #[error("no content defined for {0}")]
    MissingContent(String),

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    // -- Layout errors --
    #[error("block of height {requested:.1}pt can never fit: usable page height is {usable:.1}pt")]
    LayoutOverflow { requested: f32, usable: f32 },

    // -- Asset errors --
    #[error("font bytes are missing")]
    FontMissing,

    #[error("font could not be parsed: {0}")]
    InvalidFont(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Output --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl UrkundeError {
    /// Whether the error aborts only the current batch entry rather than the
    /// whole run. Configuration errors poison every entry alike.
    pub fn is_entry_local(&self) -> bool {
        !matches!(
            self,
            Self::InvalidConfig(_) | Self::FontMissing | Self::InvalidFont(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, UrkundeError>;
