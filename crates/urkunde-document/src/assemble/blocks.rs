// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing primitives shared by every content builder.
//
// Each helper asks the engine for room at the smallest drawable unit (one
// text line, one table row) so long content splits cleanly across pages.

use tracing::debug;

use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::{Color, ImageRef};

use super::BuildRequest;
use crate::content::ContentBlock;
use crate::layout::{DrawCommand, LayoutEngine, wrap};
use crate::overlay::OverlayFieldPlanner;
use crate::theme::Theme;

/// Column weights for tables in one part of a document.
#[derive(Debug, Clone, Copy)]
pub struct TableStyle<'s> {
    pub columns: &'s [f32],
}

impl TableStyle<'static> {
    pub const EVEN: Self = TableStyle { columns: &[] };
}

impl TableStyle<'_> {
    /// Absolute column widths for a row of `cells` cells. Falls back to an
    /// even split when the weights don't match the row.
    fn widths(&self, total: f32, cells: usize) -> Vec<f32> {
        if self.columns.len() == cells && self.columns.iter().all(|w| *w > 0.0) {
            let sum: f32 = self.columns.iter().sum();
            self.columns.iter().map(|w| total * w / sum).collect()
        } else {
            vec![total / cells as f32; cells]
        }
    }
}

/// How a document is signed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOff {
    /// Institution name, signatory, and the official seal.
    Seal,
    /// Signatory and a blank line for a handwritten signature.
    SignatureLine { with_issuer: bool },
}

/// One pre-wrapped text line in flow. Returns the baseline it was drawn at.
pub fn flow_line(
    engine: &mut LayoutEngine<'_>,
    text: &str,
    x: f32,
    size: f32,
    line_height: f32,
    color: Color,
) -> Result<f32> {
    engine.ensure_space(line_height.max(size))?;
    engine.draw(DrawCommand::text(text, x, size, color))?;
    let baseline = engine.cursor();
    engine.advance((line_height - size).max(0.0));
    Ok(baseline)
}

/// Logo, centered title and subtitle, and the header rule. Positions are
/// fixed offsets from the top edge of page 1.
pub fn draw_header(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
    double_rule: bool,
) {
    let config = engine.config();
    let (width, height) = config.page_size();

    if request.assets.has_image(ImageRef::Logo) {
        engine.place(DrawCommand::Image {
            image: ImageRef::Logo,
            x: config.margin_x,
            y: height - config.logo_top_offset - config.logo_size,
            w: config.logo_size,
            h: config.logo_size,
        });
    }

    let title = &request.content.title;
    engine.place(DrawCommand::Text {
        content: title.clone(),
        x: centered_x(config, width, title, config.title_size),
        y: height - config.title_top_offset,
        size: config.title_size,
        color: theme.primary,
    });

    if let Some(subtitle) = &request.content.subtitle {
        engine.place(DrawCommand::Text {
            content: subtitle.clone(),
            x: centered_x(config, width, subtitle, config.subtitle_size),
            y: height - config.subtitle_top_offset,
            size: config.subtitle_size,
            color: theme.secondary,
        });
    }

    let rule_y = height - config.header_rule_top_offset;
    let rules: &[f32] = if double_rule { &[0.0, 3.0] } else { &[0.0] };
    for offset in rules {
        engine.place(DrawCommand::Line {
            x1: config.margin_x,
            y1: rule_y - offset,
            x2: width - config.margin_x,
            y2: rule_y - offset,
            thickness: 1.2,
            color: theme.accent,
        });
    }
}

/// Overlay labels and underlines, then move the cursor to the body start.
///
/// The body start is a fixed offset too, so header differences between
/// templates can never push the fields around.
pub fn draw_overlay_band(engine: &mut LayoutEngine<'_>, theme: &Theme, request: &BuildRequest<'_>) {
    let config = engine.config();
    OverlayFieldPlanner::new(config).draw_fields(
        engine,
        request.labels,
        theme.secondary,
        theme.accent,
    );
    let (_, height) = config.page_size();
    engine.move_to(height - config.body_top_offset);
}

/// A paragraph wrapped to the configured width, followed by the gap.
pub fn draw_paragraph(engine: &mut LayoutEngine<'_>, theme: &Theme, text: &str) -> Result<()> {
    let config = engine.config();
    for line in wrap(text, config.paragraph_wrap_chars) {
        flow_line(
            engine,
            &line,
            config.margin_x,
            config.paragraph_size,
            config.paragraph_line_height,
            theme.secondary,
        )?;
    }
    engine.advance(config.paragraph_gap);
    Ok(())
}

/// Reject modules that could never fit on one page.
///
/// Uses the bullet-count estimate, not the wrapped line count.
pub fn preflight(engine: &LayoutEngine<'_>, blocks: &[ContentBlock]) -> Result<()> {
    let config = engine.config();
    let usable = config.usable_height();
    for block in blocks {
        if let ContentBlock::ModuleGroup { title, bullets } = block {
            let estimate = config.estimated_module_height(bullets.len());
            debug!(module = %title, estimate, "module height estimate");
            if estimate > usable {
                return Err(UrkundeError::LayoutOverflow {
                    requested: estimate,
                    usable,
                });
            }
        }
    }
    Ok(())
}

/// Lay out content blocks in order.
pub fn draw_blocks(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
    blocks: &[ContentBlock],
    table: TableStyle<'_>,
) -> Result<()> {
    let gap = engine.config().paragraph_gap;
    let mut in_table = false;

    for block in blocks {
        let is_row = matches!(block, ContentBlock::TableRow { .. });
        if in_table && !is_row {
            engine.advance(gap);
        }

        match block {
            ContentBlock::SectionHeader { title } => draw_section_header(engine, theme, title)?,
            ContentBlock::ModuleGroup { title, bullets } => {
                draw_module(engine, theme, title, bullets)?
            }
            ContentBlock::Paragraph { text } => draw_paragraph(engine, theme, text)?,
            ContentBlock::TableRow { cells } => {
                draw_table_row(engine, theme, cells, table, !in_table)?
            }
            ContentBlock::ImageBlock {
                image,
                width,
                height,
            } => draw_image(engine, request, *image, *width, *height)?,
        }

        in_table = is_row;
    }

    if in_table {
        engine.advance(gap);
    }
    Ok(())
}

fn draw_section_header(engine: &mut LayoutEngine<'_>, theme: &Theme, title: &str) -> Result<()> {
    let config = engine.config();
    let baseline = flow_line(
        engine,
        title,
        config.margin_x,
        config.section_header_size,
        config.section_header_height,
        theme.primary,
    )?;
    engine.place(DrawCommand::Line {
        x1: config.margin_x,
        y1: baseline - 3.0,
        x2: config.margin_x + config.text_width(title, config.section_header_size) + 10.0,
        y2: baseline - 3.0,
        thickness: 0.8,
        color: theme.accent,
    });
    Ok(())
}

/// Module header then bullets, each with its own space check, so the header
/// can end one page while its bullets start the next.
fn draw_module(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    title: &str,
    bullets: &[String],
) -> Result<()> {
    let config = engine.config();
    flow_line(
        engine,
        title,
        config.margin_x,
        config.module_header_size,
        config.module_header_height,
        theme.primary,
    )?;

    let text_x = config.margin_x + config.bullet_indent;
    for bullet in bullets {
        for (i, line) in wrap(bullet, config.bullet_wrap_chars).iter().enumerate() {
            let baseline = flow_line(
                engine,
                line,
                text_x,
                config.bullet_size,
                config.bullet_height,
                theme.secondary,
            )?;
            if i == 0 {
                engine.place(DrawCommand::Text {
                    content: "•".into(),
                    x: text_x - 9.0,
                    y: baseline,
                    size: config.bullet_size,
                    color: theme.accent,
                });
            }
        }
    }

    engine.advance(config.module_gap);
    Ok(())
}

fn draw_table_row(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    cells: &[String],
    style: TableStyle<'_>,
    header: bool,
) -> Result<()> {
    if cells.is_empty() {
        return Ok(());
    }
    let config = engine.config();
    let padding = config.table_cell_padding;
    let widths = style.widths(config.content_width(), cells.len());

    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .zip(&widths)
        .map(|(cell, w)| {
            let chars = config.chars_fitting(w - 2.0 * padding, config.table_text_size);
            wrap(cell, chars)
        })
        .collect();
    let lines = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let row_height = lines as f32 * config.table_line_height + 2.0 * padding;

    engine.ensure_space(row_height)?;
    let top = engine.cursor();
    let (fill, text_color) = if header {
        (Some(theme.primary), Color::WHITE)
    } else {
        (None, theme.secondary)
    };

    let mut x = config.margin_x;
    for (cell_lines, w) in wrapped.iter().zip(&widths) {
        engine.place(DrawCommand::Rectangle {
            x,
            y: top - row_height,
            w: *w,
            h: row_height,
            fill,
            border_color: Some(theme.border),
            border_width: Some(0.5),
        });
        for (k, line) in cell_lines.iter().enumerate() {
            engine.place(DrawCommand::Text {
                content: line.clone(),
                x: x + padding,
                y: top - padding - config.table_text_size - k as f32 * config.table_line_height,
                size: config.table_text_size,
                color: text_color,
            });
        }
        x += w;
    }

    engine.advance(row_height);
    Ok(())
}

/// Centered image block. Skipped entirely, space included, when the asset
/// is missing.
fn draw_image(
    engine: &mut LayoutEngine<'_>,
    request: &BuildRequest<'_>,
    image: ImageRef,
    width: f32,
    height: f32,
) -> Result<()> {
    if !request.assets.has_image(image) {
        debug!(?image, "image asset missing, skipping block");
        return Ok(());
    }
    let config = engine.config();
    engine.ensure_space(height)?;
    let (page_width, _) = config.page_size();
    engine.place(DrawCommand::Image {
        image,
        x: (page_width - width) / 2.0,
        y: engine.cursor() - height,
        w: width,
        h: height,
    });
    engine.advance(height + config.paragraph_gap);
    Ok(())
}

/// Closing statement and signature block, kept together on one page.
///
/// The signatory column is aligned with the issue-date field so a stamped
/// date and the signature read as one block. The block always reserves its
/// full height, seal or no seal.
pub fn draw_closing(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
    sign_off: SignOff,
) -> Result<()> {
    let config = engine.config();
    let (width, _) = config.page_size();
    let (column_x, _) = OverlayFieldPlanner::new(config)
        .field_position(urkunde_core::types::OverlayFieldName::IssueDate);

    engine.ensure_space(config.signature_block_height)?;
    let block_top = engine.cursor();
    let closing = &request.content.closing;

    let statement_size = config.paragraph_size + 1.0;
    flow_line(
        engine,
        &closing.statement,
        centered_x(config, width, &closing.statement, statement_size),
        statement_size,
        config.paragraph_line_height + 12.0,
        theme.secondary,
    )?;

    let with_issuer = match sign_off {
        SignOff::Seal => true,
        SignOff::SignatureLine { with_issuer } => with_issuer,
    };
    if with_issuer {
        flow_line(
            engine,
            request.issuer,
            column_x,
            config.paragraph_size,
            config.paragraph_line_height,
            theme.secondary,
        )?;
    }

    let signatory_size = config.module_header_size;
    let baseline = flow_line(
        engine,
        &closing.signatory,
        column_x,
        signatory_size,
        config.paragraph_line_height,
        theme.primary,
    )?;
    let mark_x = column_x + config.text_width(&closing.signatory, signatory_size) + 10.0;

    match sign_off {
        SignOff::Seal => {
            if request.assets.has_image(ImageRef::Seal) {
                engine.place(DrawCommand::Image {
                    image: ImageRef::Seal,
                    x: mark_x,
                    y: baseline - config.seal_size / 2.0,
                    w: config.seal_size,
                    h: config.seal_size,
                });
            } else {
                debug!("seal asset missing, closing without seal");
            }
        }
        SignOff::SignatureLine { .. } => {
            engine.place(DrawCommand::Line {
                x1: mark_x,
                y1: baseline - 2.0,
                x2: mark_x + 110.0,
                y2: baseline - 2.0,
                thickness: 0.8,
                color: theme.secondary,
            });
            engine.place(DrawCommand::Text {
                content: "(서명)".into(),
                x: mark_x + 114.0,
                y: baseline,
                size: config.bullet_size,
                color: theme.secondary,
            });
        }
    }

    engine.move_to(block_top - config.signature_block_height);
    Ok(())
}

fn centered_x(config: &urkunde_core::LayoutConfig, page_width: f32, text: &str, size: f32) -> f32 {
    ((page_width - config.text_width(text, size)) / 2.0).max(config.margin_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::DocumentGenerator;
    use crate::assets::AssetBundle;
    use crate::assets::tests::bundle;
    use crate::content::{Closing, ContentCatalog, DocumentContent};
    use crate::layout::Document;
    use crate::overlay::OverlayLabels;
    use crate::theme::ThemeRegistry;
    use urkunde_core::LayoutConfig;
    use urkunde_core::types::{Template, TemplateFamily};

    fn content(blocks: Vec<ContentBlock>) -> DocumentContent {
        DocumentContent {
            title: "시험 문서".into(),
            subtitle: None,
            intro: "머리말".into(),
            blocks,
            evaluation: Vec::new(),
            closing: Closing {
                statement: "위와 같이 확인합니다.".into(),
                signatory: "담당자".into(),
            },
        }
    }

    fn image_block(image: ImageRef, width: f32, height: f32) -> ContentBlock {
        ContentBlock::ImageBlock {
            image,
            width,
            height,
        }
    }

    /// Runs `draw_image` on a fresh engine whose cursor starts at `start`.
    fn draw_one(
        config: &LayoutConfig,
        assets: &AssetBundle,
        start: f32,
        width: f32,
        height: f32,
    ) -> (Document, f32) {
        let theme = ThemeRegistry::default()
            .theme_for(TemplateFamily::Opinion)
            .unwrap();
        let labels = OverlayLabels::default();
        let body = content(vec![image_block(ImageRef::Seal, width, height)]);
        let request = BuildRequest {
            template: Template::Opinion,
            content: &body,
            assets,
            issuer: "기관",
            labels: &labels,
        };
        let mut engine = LayoutEngine::new(config, theme);
        engine.move_to(start);
        draw_image(&mut engine, &request, ImageRef::Seal, width, height).unwrap();
        let cursor = engine.cursor();
        (engine.finish(Template::Opinion, "시험 문서"), cursor)
    }

    fn images(document: &Document, page: usize) -> Vec<DrawCommand> {
        document.pages()[page]
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
            .cloned()
            .collect()
    }

    #[test]
    fn image_block_is_centered_at_the_cursor() {
        let config = LayoutConfig::default();
        let (page_width, _) = config.page_size();
        let top = config.page_top();
        let (document, cursor) = draw_one(&config, &bundle(false, true), top, 120.0, 80.0);

        assert_eq!(document.page_count(), 1);
        assert_eq!(
            images(&document, 0),
            vec![DrawCommand::Image {
                image: ImageRef::Seal,
                x: (page_width - 120.0) / 2.0,
                y: top - 80.0,
                w: 120.0,
                h: 80.0,
            }]
        );
        assert_eq!(cursor, top - 80.0 - config.paragraph_gap);
    }

    #[test]
    fn image_that_does_not_fit_starts_a_new_page() {
        let config = LayoutConfig::default();
        let start = config.bottom_margin + 50.0;
        let (document, cursor) = draw_one(&config, &bundle(false, true), start, 100.0, 120.0);

        assert_eq!(document.page_count(), 2);
        assert!(images(&document, 0).is_empty());
        match images(&document, 1).as_slice() {
            [DrawCommand::Image { y, h, .. }] => {
                assert_eq!(*y, config.page_top() - 120.0);
                assert_eq!(*h, 120.0);
            }
            other => panic!("expected one image on page 2, got {other:?}"),
        }
        assert_eq!(cursor, config.page_top() - 120.0 - config.paragraph_gap);
    }

    #[test]
    fn missing_image_is_skipped_without_moving_the_cursor() {
        let config = LayoutConfig::default();
        let start = config.bottom_margin + 50.0;
        let (document, cursor) = draw_one(&config, &bundle(true, false), start, 100.0, 120.0);

        assert_eq!(document.page_count(), 1);
        assert!(document.pages()[0].commands().is_empty());
        assert_eq!(cursor, start);
    }

    fn generate_with(blocks: Vec<ContentBlock>, assets: &AssetBundle) -> Document {
        let mut catalog = ContentCatalog::builtin().unwrap();
        catalog.insert_document(&Template::Opinion, content(blocks));
        DocumentGenerator::new(LayoutConfig::default(), ThemeRegistry::default(), catalog)
            .unwrap()
            .generate(&Template::Opinion, assets)
            .unwrap()
    }

    fn baseline_of(document: &Document, text: &str) -> (usize, f32) {
        document
            .pages()
            .iter()
            .find_map(|page| {
                page.commands().iter().find_map(|c| match c {
                    DrawCommand::Text { content, y, .. } if content == text => {
                        Some((page.number(), *y))
                    }
                    _ => None,
                })
            })
            .unwrap_or_else(|| panic!("no text {text:?}"))
    }

    #[test]
    fn image_block_pushes_following_content_down() {
        let config = LayoutConfig::default();
        let following = ContentBlock::Paragraph {
            text: "이어지는 단락".into(),
        };
        let plain = generate_with(vec![following.clone()], &bundle(false, false));
        let with_image = generate_with(
            vec![image_block(ImageRef::Logo, 90.0, 60.0), following.clone()],
            &bundle(true, false),
        );
        let with_missing = generate_with(
            vec![image_block(ImageRef::Logo, 90.0, 60.0), following],
            &bundle(false, false),
        );

        let (page, y) = baseline_of(&plain, "이어지는 단락");
        assert_eq!(baseline_of(&with_missing, "이어지는 단락"), (page, y));
        assert_eq!(
            baseline_of(&with_image, "이어지는 단락"),
            (page, y - 60.0 - config.paragraph_gap)
        );
        assert_eq!(plain, with_missing);
    }

    #[test]
    fn weighted_columns_sum_to_width() {
        let style = TableStyle {
            columns: &[1.0, 2.0, 1.0],
        };
        let widths = style.widths(400.0, 3);
        assert_eq!(widths, vec![100.0, 200.0, 100.0]);
    }

    #[test]
    fn mismatched_weights_fall_back_to_even() {
        let style = TableStyle { columns: &[1.0, 2.0] };
        assert_eq!(style.widths(300.0, 3), vec![100.0; 3]);
        assert_eq!(TableStyle::EVEN.widths(300.0, 2), vec![150.0; 2]);
    }
}
