// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Draw commands, pages, and finished documents.
//
// All coordinates are PDF points with the origin at the bottom-left corner of
// the page. Text `y` is the baseline; rectangle and image `y` is the bottom
// edge.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use urkunde_core::error::Result;
use urkunde_core::types::{Color, ImageRef, Template};

/// One primitive for the renderer backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        content: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
    Rectangle {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Color>,
        border_color: Option<Color>,
        border_width: Option<f32>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Color,
    },
    Image {
        image: ImageRef,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

impl DrawCommand {
    /// A text line for flow drawing; the engine assigns `y`.
    pub fn text(content: impl Into<String>, x: f32, size: f32, color: Color) -> Self {
        Self::Text {
            content: content.into(),
            x,
            y: 0.0,
            size,
            color,
        }
    }

    /// A rectangle for flow drawing; the engine assigns `y`.
    pub fn block(x: f32, w: f32, h: f32) -> Self {
        Self::Rectangle {
            x,
            y: 0.0,
            w,
            h,
            fill: None,
            border_color: None,
            border_width: None,
        }
    }

    pub fn filled(mut self, color: Color) -> Self {
        if let Self::Rectangle { fill, .. } = &mut self {
            *fill = Some(color);
        }
        self
    }

    pub fn bordered(mut self, color: Color, width: f32) -> Self {
        if let Self::Rectangle {
            border_color,
            border_width,
            ..
        } = &mut self
        {
            *border_color = Some(color);
            *border_width = Some(width);
        }
        self
    }

    /// How far the cursor moves when this command is drawn in flow.
    ///
    /// Text lines and rectangles consume their height. Lines and images are
    /// decorations placed by the caller and consume nothing.
    pub fn flow_extent(&self) -> f32 {
        match self {
            Self::Text { size, .. } => *size,
            Self::Rectangle { h, .. } => *h,
            Self::Line { .. } | Self::Image { .. } => 0.0,
        }
    }

    /// Re-anchor the command so its top edge sits at `cursor`.
    pub(crate) fn anchored_at(mut self, cursor: f32) -> Self {
        let extent = self.flow_extent();
        match &mut self {
            Self::Text { y, .. } | Self::Rectangle { y, .. } => *y = cursor - extent,
            Self::Line { .. } | Self::Image { .. } => {}
        }
        self
    }

    /// Lowest y-coordinate the command touches.
    pub fn min_y(&self) -> f32 {
        match self {
            Self::Text { y, .. } | Self::Rectangle { y, .. } | Self::Image { y, .. } => *y,
            Self::Line { y1, y2, .. } => y1.min(*y2),
        }
    }
}

/// One fixed-size page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub(crate) number: usize,
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Border decoration drawn once when the page is created.
    pub(crate) frame: Vec<DrawCommand>,
    /// Content in drawing order.
    pub(crate) commands: Vec<DrawCommand>,
}

impl Page {
    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn frame(&self) -> &[DrawCommand] {
        &self.frame
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Frame first, then content, in the order a renderer should paint them.
    pub fn all_commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.frame.iter().chain(self.commands.iter())
    }

    /// Text contents on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

/// A finished, read-only multi-page document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    template: Template,
    title: String,
    pages: Vec<Page>,
}

impl Document {
    pub(crate) fn new(template: Template, title: String, pages: Vec<Page>) -> Self {
        Self {
            template,
            title,
            pages,
        }
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// SHA-256 (hex) of the serialized command stream.
    ///
    /// Two generations of the same template with the same content and assets
    /// produce the same fingerprint.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(&self.pages)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    /// Locate the first page and text command containing `needle`.
    pub fn find_text(&self, needle: &str) -> Option<(usize, &DrawCommand)> {
        self.pages.iter().find_map(|page| {
            page.commands
                .iter()
                .find(|cmd| matches!(cmd, DrawCommand::Text { content, .. } if content.contains(needle)))
                .map(|cmd| (page.number, cmd))
        })
    }
}
