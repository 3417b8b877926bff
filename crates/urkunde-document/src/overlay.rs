// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Template-invariant overlay fields.
//
// A later stamping step writes the student's name and the issue date at
// hardcoded positions. Those positions come from here and only here; no
// template may move them, whatever it draws above or below.

use urkunde_core::LayoutConfig;
use urkunde_core::types::{Color, OverlayFieldName};

use crate::layout::{DrawCommand, LayoutEngine};

/// A stamping slot: label baseline origin on page 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayField {
    pub name: OverlayFieldName,
    pub x: f32,
    pub y: f32,
}

/// Resolves overlay fields from the layout configuration.
#[derive(Debug, Clone, Copy)]
pub struct OverlayFieldPlanner<'a> {
    config: &'a LayoutConfig,
}

impl<'a> OverlayFieldPlanner<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Label origin for a field.
    pub fn field_position(&self, name: OverlayFieldName) -> (f32, f32) {
        let point = match name {
            OverlayFieldName::StudentName => self.config.student_name_field,
            OverlayFieldName::IssueDate => self.config.issue_date_field,
        };
        (point.x, point.y)
    }

    pub fn field(&self, name: OverlayFieldName) -> OverlayField {
        let (x, y) = self.field_position(name);
        OverlayField { name, x, y }
    }

    /// Where a stamped value starts: just past the label, on the underline.
    pub fn value_position(&self, name: OverlayFieldName) -> (f32, f32) {
        let (x, y) = self.field_position(name);
        (x + self.config.overlay_label_width + 4.0, y)
    }

    /// Draw every field's label and underline at its fixed position.
    pub fn draw_fields(
        &self,
        engine: &mut LayoutEngine<'_>,
        labels: &OverlayLabels,
        label_color: Color,
        rule_color: Color,
    ) {
        for name in OverlayFieldName::ALL {
            let (x, y) = self.field_position(name);
            let underline_start = x + self.config.overlay_label_width;
            engine.place(DrawCommand::Text {
                content: labels.label(name).to_string(),
                x,
                y,
                size: self.config.overlay_label_size,
                color: label_color,
            });
            engine.place(DrawCommand::Line {
                x1: underline_start,
                y1: y - 4.0,
                x2: underline_start + self.config.overlay_underline_width,
                y2: y - 4.0,
                thickness: 0.8,
                color: rule_color,
            });
        }
    }
}

/// Label text printed before each field's underline.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayLabels {
    pub student_name: String,
    pub issue_date: String,
}

impl OverlayLabels {
    pub fn label(&self, name: OverlayFieldName) -> &str {
        match name {
            OverlayFieldName::StudentName => &self.student_name,
            OverlayFieldName::IssueDate => &self.issue_date,
        }
    }
}

impl Default for OverlayLabels {
    fn default() -> Self {
        Self {
            student_name: "성    명".into(),
            issue_date: "발 급 일".into(),
        }
    }
}
