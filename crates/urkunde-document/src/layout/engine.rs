// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-flow layout engine.
//
// The engine owns the page list and a vertical cursor that moves down the
// current page as content is drawn. Callers ask for room with
// `ensure_space` before each smallest drawable unit (a module header, a
// single bullet line); when the unit would cross the bottom margin the engine
// starts a fresh page, paints its frame, and resets the cursor. Callers never
// hold a page handle, so a page break can never leave them drawing onto a
// stale page.

use tracing::debug;

use urkunde_core::LayoutConfig;
use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::Template;

use super::page::{DrawCommand, Document, Page};
use crate::theme::Theme;

/// Tolerance for float comparisons against the usable page height.
const EPSILON: f32 = 1e-3;

/// Single-document layout state. Not shared between documents.
pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
    theme: Theme,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine with its first page already started.
    pub fn new(config: &'a LayoutConfig, theme: Theme) -> Self {
        let mut engine = Self {
            config,
            theme,
            pages: Vec::new(),
            cursor: 0.0,
        };
        engine.begin_page();
        engine
    }

    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Current cursor position (y of the next block's top edge).
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// 1-based number of the page being drawn.
    pub fn page_number(&self) -> usize {
        self.pages.len()
    }

    /// Room left above the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.cursor - self.config.bottom_margin
    }

    /// Start a new page, paint its frame, and move the cursor to the top
    /// margin.
    pub fn begin_page(&mut self) {
        let (width, height) = self.config.page_size();
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            width,
            height,
            frame: self.frame(width, height),
            commands: Vec::new(),
        });
        self.cursor = self.config.page_top();
        debug!(page = number, cursor = self.cursor, "began page");
    }

    /// Make sure a block of `height` fits above the bottom margin, breaking to
    /// a new page if it does not. Returns whether a page break happened.
    ///
    /// A block taller than the whole usable page can never fit and is
    /// reported as `LayoutOverflow`.
    pub fn ensure_space(&mut self, height: f32) -> Result<bool> {
        let usable = self.config.usable_height();
        if height > usable + EPSILON {
            return Err(UrkundeError::LayoutOverflow {
                requested: height,
                usable,
            });
        }
        if self.cursor - height < self.config.bottom_margin - EPSILON {
            debug!(
                page = self.page_number(),
                requested = height,
                remaining = self.remaining(),
                "block does not fit, breaking page"
            );
            self.begin_page();
            return Ok(true);
        }
        Ok(false)
    }

    /// Draw a command in flow: make room for its extent, anchor it at the
    /// cursor, and advance past it.
    pub fn draw(&mut self, command: DrawCommand) -> Result<()> {
        let extent = command.flow_extent();
        self.ensure_space(extent)?;
        let anchored = command.anchored_at(self.cursor);
        self.current_page().commands.push(anchored);
        self.cursor -= extent;
        Ok(())
    }

    /// Draw a command at its own coordinates without moving the cursor.
    pub fn place(&mut self, command: DrawCommand) {
        self.current_page().commands.push(command);
    }

    /// Move the cursor down by `delta` without drawing.
    ///
    /// The cursor may end up below the bottom margin; the next
    /// `ensure_space` then breaks the page.
    pub fn advance(&mut self, delta: f32) {
        self.cursor -= delta;
    }

    /// Jump the cursor to an absolute position on the current page, used for
    /// fixed header bands.
    pub fn move_to(&mut self, y: f32) {
        self.cursor = y;
    }

    /// Seal the pages into a read-only document.
    pub fn finish(self, template: Template, title: impl Into<String>) -> Document {
        debug!(pages = self.pages.len(), %template, "layout finished");
        Document::new(template, title.into(), self.pages)
    }

    fn current_page(&mut self) -> &mut Page {
        // `new` always begins a page, so the list is never empty.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Background tint, outer border, and inner hairline.
    fn frame(&self, width: f32, height: f32) -> Vec<DrawCommand> {
        let outer = self.config.frame_inset;
        let inner = self.config.frame_inner_inset;
        vec![
            DrawCommand::Rectangle {
                x: 0.0,
                y: 0.0,
                w: width,
                h: height,
                fill: Some(self.theme.background),
                border_color: None,
                border_width: None,
            },
            DrawCommand::Rectangle {
                x: outer,
                y: outer,
                w: width - 2.0 * outer,
                h: height - 2.0 * outer,
                fill: None,
                border_color: Some(self.theme.border),
                border_width: Some(self.config.frame_border_width),
            },
            DrawCommand::Rectangle {
                x: inner,
                y: inner,
                w: width - 2.0 * inner,
                h: height - 2.0 * inner,
                fill: None,
                border_color: Some(self.theme.accent),
                border_width: Some(self.config.frame_inner_width),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeRegistry;
    use urkunde_core::types::{Color, TemplateFamily};

    fn theme() -> Theme {
        ThemeRegistry::default()
            .theme_for(TemplateFamily::Education)
            .unwrap()
    }

    fn line(size: f32) -> DrawCommand {
        DrawCommand::text("줄", 60.0, size, Color::BLACK)
    }

    #[test]
    fn new_engine_starts_at_top_margin() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config, theme());
        assert_eq!(engine.page_number(), 1);
        assert_eq!(engine.cursor(), config.page_top());
        assert_eq!(engine.pages[0].frame.len(), 3);
    }

    #[test]
    fn draw_advances_by_extent() {
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&config, theme());
        let top = engine.cursor();
        engine.draw(line(12.0)).unwrap();
        assert_eq!(engine.cursor(), top - 12.0);
        engine.advance(13.0);
        assert_eq!(engine.cursor(), top - 25.0);
    }

    #[test]
    fn ensure_space_breaks_only_when_needed() {
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&config, theme());
        engine.move_to(config.bottom_margin + 20.0);
        assert!(!engine.ensure_space(20.0).unwrap());
        assert_eq!(engine.page_number(), 1);
        assert!(engine.ensure_space(20.5).unwrap());
        assert_eq!(engine.page_number(), 2);
        assert_eq!(engine.cursor(), config.page_top());
    }

    #[test]
    fn every_flow_command_stays_above_bottom_margin() {
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&config, theme());
        let mut breaks = 0;
        for i in 0..400 {
            let size = [10.0, 12.0, 14.0, 31.0][i % 4];
            let before = engine.page_number();
            engine.draw(line(size)).unwrap();
            engine.advance(5.0);
            let after = engine.page_number();
            assert!(after == before || after == before + 1);
            breaks += after - before;
        }
        let document = engine.finish(Template::Opinion, "t");
        assert_eq!(document.page_count(), breaks + 1);
        for page in document.pages() {
            for cmd in page.commands() {
                assert!(cmd.min_y() >= config.bottom_margin - EPSILON, "{cmd:?}");
            }
        }
    }

    #[test]
    fn full_page_block_fits_on_fresh_page() {
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&config, theme());
        engine.advance(1.0);
        assert!(engine.ensure_space(config.usable_height()).unwrap());
        assert!(!engine.ensure_space(config.usable_height()).unwrap());
    }

    #[test]
    fn block_taller_than_page_is_fatal() {
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&config, theme());
        let err = engine.ensure_space(config.usable_height() + 1.0).unwrap_err();
        assert!(matches!(err, UrkundeError::LayoutOverflow { .. }));
        assert_eq!(engine.page_number(), 1);
    }

    #[test]
    fn place_does_not_move_cursor() {
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&config, theme());
        let before = engine.cursor();
        engine.place(DrawCommand::Line {
            x1: 60.0,
            y1: 100.0,
            x2: 200.0,
            y2: 100.0,
            thickness: 1.0,
            color: Color::BLACK,
        });
        assert_eq!(engine.cursor(), before);
        assert_eq!(engine.pages[0].commands.len(), 1);
    }

    #[test]
    fn every_page_gets_a_themed_frame() {
        let config = LayoutConfig::default();
        let theme = theme();
        let mut engine = LayoutEngine::new(&config, theme);
        engine.begin_page();
        engine.begin_page();
        for page in &engine.pages {
            assert!(page.frame.iter().any(|cmd| matches!(
                cmd,
                DrawCommand::Rectangle { border_color: Some(c), .. } if *c == theme.border
            )));
        }
    }
}
