// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout configuration.
//
// Every number here is a hand-tuned pagination threshold. Changing one moves
// page breaks, so the defaults are part of the observable output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UrkundeError};
use crate::types::PaperSize;

/// A fixed point on the page in PDF coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePoint {
    pub x: f32,
    pub y: f32,
}

/// Page geometry, typography, and pagination constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub paper_size: PaperSize,

    // -- Margins and frame --
    pub top_margin: f32,
    pub bottom_margin: f32,
    /// Left edge of flowing content; the right edge mirrors it.
    pub margin_x: f32,
    pub frame_inset: f32,
    pub frame_border_width: f32,
    pub frame_inner_inset: f32,
    pub frame_inner_width: f32,

    // -- First-page header band (offsets measured down from the top edge) --
    pub logo_size: f32,
    pub logo_top_offset: f32,
    pub title_top_offset: f32,
    pub title_size: f32,
    pub subtitle_top_offset: f32,
    pub subtitle_size: f32,
    pub header_rule_top_offset: f32,
    /// Where flowing content starts on the first page.
    pub body_top_offset: f32,

    // -- Overlay fields --
    pub student_name_field: PagePoint,
    pub issue_date_field: PagePoint,
    pub overlay_label_size: f32,
    /// Horizontal distance from a field's label to the start of its underline.
    pub overlay_label_width: f32,
    pub overlay_underline_width: f32,

    // -- Paragraphs --
    pub paragraph_size: f32,
    pub paragraph_line_height: f32,
    pub paragraph_wrap_chars: usize,
    pub paragraph_gap: f32,

    // -- Section headers and modules --
    pub section_header_size: f32,
    pub section_header_height: f32,
    pub module_header_size: f32,
    pub module_header_height: f32,
    pub bullet_size: f32,
    pub bullet_height: f32,
    pub bullet_indent: f32,
    pub bullet_wrap_chars: usize,
    pub module_gap: f32,

    // -- Tables --
    pub table_text_size: f32,
    pub table_line_height: f32,
    pub table_cell_padding: f32,

    // -- Closing block --
    pub signature_block_height: f32,
    pub seal_size: f32,

    /// Advance width of one glyph as a fraction of the font size. Dense CJK
    /// text is full-width, so 1.0 is a safe upper bound.
    pub glyph_width_factor: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            top_margin: 60.0,
            bottom_margin: 60.0,
            margin_x: 60.0,
            frame_inset: 20.0,
            frame_border_width: 2.0,
            frame_inner_inset: 26.0,
            frame_inner_width: 0.5,
            logo_size: 56.0,
            logo_top_offset: 40.0,
            title_top_offset: 110.0,
            title_size: 24.0,
            subtitle_top_offset: 138.0,
            subtitle_size: 12.0,
            header_rule_top_offset: 152.0,
            body_top_offset: 215.0,
            student_name_field: PagePoint { x: 70.0, y: 660.0 },
            issue_date_field: PagePoint { x: 320.0, y: 660.0 },
            overlay_label_size: 11.0,
            overlay_label_width: 56.0,
            overlay_underline_width: 150.0,
            paragraph_size: 11.0,
            paragraph_line_height: 18.0,
            paragraph_wrap_chars: 40,
            paragraph_gap: 10.0,
            section_header_size: 14.0,
            section_header_height: 30.0,
            module_header_size: 12.0,
            module_header_height: 25.0,
            bullet_size: 10.0,
            bullet_height: 15.0,
            bullet_indent: 14.0,
            bullet_wrap_chars: 42,
            module_gap: 15.0,
            table_text_size: 10.0,
            table_line_height: 13.0,
            table_cell_padding: 5.0,
            signature_block_height: 130.0,
            seal_size: 70.0,
            glyph_width_factor: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Load a configuration file. Missing keys fall back to the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Page (width, height) in points.
    pub fn page_size(&self) -> (f32, f32) {
        self.paper_size.dimensions_pt()
    }

    /// Cursor position at the top of a fresh page.
    pub fn page_top(&self) -> f32 {
        self.page_size().1 - self.top_margin
    }

    /// Vertical room between the top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        self.page_size().1 - self.top_margin - self.bottom_margin
    }

    /// Horizontal room between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_size().0 - 2.0 * self.margin_x
    }

    /// Height a bulleted module is expected to take: header, one line per
    /// bullet, and the trailing gap (`25 + bullets * 15 + 15` by default).
    ///
    /// Counts bullets, not wrapped lines, so long bullets are underestimated.
    pub fn estimated_module_height(&self, bullet_count: usize) -> f32 {
        self.module_header_height + bullet_count as f32 * self.bullet_height + self.module_gap
    }

    /// Estimated rendered width of `text` at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.glyph_width_factor
    }

    /// How many glyphs of `size` fit in `width`.
    pub fn chars_fitting(&self, width: f32, size: f32) -> usize {
        ((width / (size * self.glyph_width_factor)).floor() as usize).max(1)
    }

    /// Least `signature_block_height` that holds the closing: statement,
    /// issuer, and signatory lines, plus the half of the seal that hangs
    /// below the signatory baseline.
    pub fn closing_min_height(&self) -> f32 {
        let statement = (self.paragraph_line_height + 12.0).max(self.paragraph_size + 1.0);
        let issuer = self.paragraph_line_height.max(self.paragraph_size);
        let signatory = self.paragraph_line_height.max(self.module_header_size);
        statement + issuer + signatory + self.seal_size / 2.0
    }

    /// Reject configurations that can never lay out a page.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_size();
        if width <= 0.0 || height <= 0.0 {
            return Err(UrkundeError::InvalidConfig("page size must be positive".into()));
        }
        if self.usable_height() <= 0.0 {
            return Err(UrkundeError::InvalidConfig(format!(
                "margins ({} + {}) leave no room on a {height}pt page",
                self.top_margin, self.bottom_margin
            )));
        }
        if self.content_width() <= 0.0 {
            return Err(UrkundeError::InvalidConfig(
                "side margins leave no content width".into(),
            ));
        }
        if self.paragraph_wrap_chars == 0 || self.bullet_wrap_chars == 0 {
            return Err(UrkundeError::InvalidConfig(
                "wrap widths must be at least one character".into(),
            ));
        }
        if self.glyph_width_factor <= 0.0 {
            return Err(UrkundeError::InvalidConfig(
                "glyph width factor must be positive".into(),
            ));
        }
        let closing = self.closing_min_height();
        if self.signature_block_height < closing {
            return Err(UrkundeError::InvalidConfig(format!(
                "signature block height {} is below the {closing}pt the closing lines and seal need",
                self.signature_block_height
            )));
        }
        if self.signature_block_height > self.usable_height() {
            return Err(UrkundeError::InvalidConfig(format!(
                "signature block height {} exceeds the usable page height",
                self.signature_block_height
            )));
        }
        let body_top = height - self.body_top_offset;
        if body_top > self.page_top() || body_top <= self.bottom_margin {
            return Err(UrkundeError::InvalidConfig(format!(
                "body start {body_top}pt lies outside the margins"
            )));
        }
        for (name, field) in [
            ("student-name", self.student_name_field),
            ("issue-date", self.issue_date_field),
        ] {
            if field.y <= body_top || field.y >= height - self.header_rule_top_offset {
                return Err(UrkundeError::InvalidConfig(format!(
                    "{name} field at y={} must sit between the header rule and the body",
                    field.y
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        LayoutConfig::default().validate().unwrap();
    }

    #[test]
    fn module_estimate_matches_hand_tuned_formula() {
        let config = LayoutConfig::default();
        assert_eq!(config.estimated_module_height(3), 25.0 + 3.0 * 15.0 + 15.0);
        assert_eq!(config.estimated_module_height(0), 40.0);
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let config = LayoutConfig {
            top_margin: 500.0,
            bottom_margin: 400.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(UrkundeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_wrap_width_is_rejected() {
        let config = LayoutConfig {
            bullet_wrap_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{ "bottom_margin": 72.0 }"#).unwrap();
        assert_eq!(config.bottom_margin, 72.0);
        assert_eq!(config.module_header_height, 25.0);
    }

    #[test]
    fn closing_min_height_counts_lines_and_half_seal() {
        let config = LayoutConfig::default();
        assert_eq!(config.closing_min_height(), 30.0 + 18.0 + 18.0 + 35.0);
        assert!(config.signature_block_height >= config.closing_min_height());
    }

    #[test]
    fn short_signature_block_is_rejected() {
        let config = LayoutConfig {
            signature_block_height: 60.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(UrkundeError::InvalidConfig(msg)) if msg.contains("signature block")
        ));

        let larger_seal = LayoutConfig {
            seal_size: 200.0,
            ..Default::default()
        };
        assert!(larger_seal.validate().is_err());

        let exact = LayoutConfig {
            signature_block_height: LayoutConfig::default().closing_min_height(),
            ..Default::default()
        };
        exact.validate().unwrap();
    }

    #[test]
    fn overlay_field_inside_body_is_rejected() {
        let config = LayoutConfig {
            issue_date_field: PagePoint { x: 320.0, y: 300.0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
