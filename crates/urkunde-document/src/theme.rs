// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-family color themes.
//
// A lookup miss is an error, never a fallback palette: a certificate printed
// in the wrong colors is worse than no certificate.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::{Color, TemplateFamily};

/// Five-color palette applied to every page of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Titles, section headers, and table header fill.
    pub primary: Color,
    /// Body text.
    pub secondary: Color,
    /// Outer page frame and table borders.
    pub border: Color,
    /// Inner frame hairline, bullets, and rules.
    pub accent: Color,
    /// Page tint.
    pub background: Color,
}

/// Immutable family-to-theme table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRegistry {
    themes: BTreeMap<TemplateFamily, Theme>,
}

impl ThemeRegistry {
    /// A registry containing exactly the given entries.
    pub fn new(themes: impl IntoIterator<Item = (TemplateFamily, Theme)>) -> Self {
        Self {
            themes: themes.into_iter().collect(),
        }
    }

    /// Parse a JSON object keyed by family name. Families missing from the
    /// file are missing from the registry; see [`Self::with_overrides`].
    pub fn from_json(json: &str) -> Result<Self> {
        let themes: BTreeMap<TemplateFamily, Theme> = serde_json::from_str(json)?;
        Ok(Self { themes })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Replace the palettes of every family present in `overrides`,
    /// keeping the rest.
    pub fn with_overrides(mut self, overrides: ThemeRegistry) -> Self {
        self.themes.extend(overrides.themes);
        self
    }

    pub fn theme_for(&self, family: TemplateFamily) -> Result<Theme> {
        self.themes
            .get(&family)
            .copied()
            .ok_or(UrkundeError::UnknownTheme(family))
    }

    /// Fail fast if any family has no palette.
    pub fn check_complete(&self) -> Result<()> {
        TemplateFamily::ALL
            .into_iter()
            .try_for_each(|family| self.theme_for(family).map(|_| ()))
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new([
            (
                TemplateFamily::Education,
                Theme {
                    primary: Color::rgb(0x1E, 0x3A, 0x8A),
                    secondary: Color::rgb(0x33, 0x41, 0x55),
                    border: Color::rgb(0x1E, 0x40, 0xAF),
                    accent: Color::rgb(0xCA, 0x8A, 0x04),
                    background: Color::rgb(0xF8, 0xFA, 0xFF),
                },
            ),
            (
                TemplateFamily::Assessment,
                Theme {
                    primary: Color::rgb(0x0F, 0x76, 0x6E),
                    secondary: Color::rgb(0x1F, 0x29, 0x37),
                    border: Color::rgb(0x11, 0x5E, 0x59),
                    accent: Color::rgb(0x14, 0xB8, 0xA6),
                    background: Color::rgb(0xF0, 0xFD, 0xFA),
                },
            ),
            (
                TemplateFamily::Opinion,
                Theme {
                    primary: Color::rgb(0x37, 0x41, 0x51),
                    secondary: Color::rgb(0x1F, 0x29, 0x37),
                    border: Color::rgb(0x4B, 0x55, 0x63),
                    accent: Color::rgb(0x9C, 0xA3, 0xAF),
                    background: Color::rgb(0xFF, 0xFF, 0xFF),
                },
            ),
            (
                TemplateFamily::Petition,
                Theme {
                    primary: Color::rgb(0x7F, 0x1D, 0x1D),
                    secondary: Color::rgb(0x29, 0x25, 0x24),
                    border: Color::rgb(0x99, 0x1B, 0x1B),
                    accent: Color::rgb(0xB4, 0x53, 0x09),
                    background: Color::rgb(0xFF, 0xFB, 0xF5),
                },
            ),
            (
                TemplateFamily::Reflection,
                Theme {
                    primary: Color::rgb(0x4C, 0x1D, 0x95),
                    secondary: Color::rgb(0x2E, 0x10, 0x65),
                    border: Color::rgb(0x6D, 0x28, 0xD9),
                    accent: Color::rgb(0xA7, 0x8B, 0xFA),
                    background: Color::rgb(0xFA, 0xF5, 0xFF),
                },
            ),
            (
                TemplateFamily::PracticeDiary,
                Theme {
                    primary: Color::rgb(0x16, 0x65, 0x34),
                    secondary: Color::rgb(0x1A, 0x2E, 0x05),
                    border: Color::rgb(0x15, 0x80, 0x3D),
                    accent: Color::rgb(0x84, 0xCC, 0x16),
                    background: Color::rgb(0xF7, 0xFE, 0xE7),
                },
            ),
            (
                TemplateFamily::ChangeReport,
                Theme {
                    primary: Color::rgb(0x9A, 0x34, 0x12),
                    secondary: Color::rgb(0x43, 0x14, 0x07),
                    border: Color::rgb(0xC2, 0x41, 0x0C),
                    accent: Color::rgb(0xFB, 0x92, 0x3C),
                    background: Color::rgb(0xFF, 0xF7, 0xED),
                },
            ),
        ])
    }
}
