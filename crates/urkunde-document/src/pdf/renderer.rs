// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF renderer: serialises a laid-out Document with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: each page is a `PdfPage` holding a
// `Vec<Op>`, and the document is serialised via `PdfDocument::save()`. Draw
// commands already carry PDF point coordinates with a bottom-left origin, so
// translation is one command to a handful of ops.

use std::collections::BTreeMap;
use std::path::Path;

use printpdf::{
    Color as PdfColor, FontId, Line, LinePoint, Mm, Op, PaintMode, ParsedFont, PdfDocument,
    PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Polygon, PolygonRing, Pt, RawImage, RawImageData,
    RawImageFormat, Rgb, TextItem, WindingOrder, XObjectId, XObjectTransform,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use urkunde_core::LayoutConfig;
use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::{Color, ImageRef, OverlayFieldName};

use crate::assets::{AssetBundle, DecodedImage};
use crate::layout::{Document, DrawCommand};
use crate::overlay::OverlayFieldPlanner;

/// Values written into the overlay fields of page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub student_name: String,
    pub issue_date: String,
}

impl Stamp {
    pub fn value(&self, name: OverlayFieldName) -> &str {
        match name {
            OverlayFieldName::StudentName => &self.student_name,
            OverlayFieldName::IssueDate => &self.issue_date,
        }
    }

    /// Text commands placing each value just right of its field label.
    pub fn commands(&self, config: &LayoutConfig) -> Vec<DrawCommand> {
        let planner = OverlayFieldPlanner::new(config);
        OverlayFieldName::ALL
            .into_iter()
            .filter(|name| !self.value(*name).is_empty())
            .map(|name| {
                let (x, y) = planner.value_position(name);
                DrawCommand::Text {
                    content: self.value(name).to_string(),
                    x,
                    y,
                    size: config.overlay_label_size + 1.0,
                    color: Color::BLACK,
                }
            })
            .collect()
    }
}

/// A decoded image registered with one PDF document.
struct PlacedImage {
    id: XObjectId,
    width: usize,
    height: usize,
}

/// Renders documents to PDF bytes with one embedded font.
///
/// The font is parsed once per renderer; give each worker thread its own
/// renderer.
pub struct PdfRenderer<'a> {
    config: &'a LayoutConfig,
    assets: &'a AssetBundle,
    font: ParsedFont,
}

impl<'a> PdfRenderer<'a> {
    /// Parse the bundle's font. Unparseable font data is `InvalidFont`.
    pub fn new(config: &'a LayoutConfig, assets: &'a AssetBundle) -> Result<Self> {
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let font = ParsedFont::from_bytes(assets.font(), 0, &mut warnings).ok_or_else(|| {
            UrkundeError::InvalidFont(format!(
                "printpdf could not parse {} bytes of font data",
                assets.font().len()
            ))
        })?;
        debug!(warnings = warnings.len(), "parsed font");
        Ok(Self {
            config,
            assets,
            font,
        })
    }

    /// Render a document, optionally stamping the overlay fields.
    #[instrument(skip_all, fields(template = %document.template(), pages = document.page_count()))]
    pub fn render(&self, document: &Document, stamp: Option<&Stamp>) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(document.title());
        let font = doc.add_font(&self.font);
        let images = self.register_images(&mut doc, document);
        let stamped = stamp.map(|s| s.commands(self.config)).unwrap_or_default();

        let mut pages = Vec::with_capacity(document.page_count());
        for page in document.pages() {
            let mut ops: Vec<Op> = Vec::new();
            for command in page.all_commands() {
                ops.extend(command_ops(command, &font, &images));
            }
            if page.number() == 1 {
                for command in &stamped {
                    ops.extend(command_ops(command, &font, &images));
                }
            }
            let (width, height) = page.size();
            pages.push(PdfPage::new(pt_to_mm(width), pt_to_mm(height), ops));
        }
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if output.is_empty() {
            return Err(UrkundeError::PdfError("serialiser produced no output".into()));
        }
        debug!(bytes = output.len(), warnings = warnings.len(), "rendered PDF");
        Ok(output)
    }

    /// Render and write the PDF to a file.
    pub fn write_to_file(
        &self,
        document: &Document,
        stamp: Option<&Stamp>,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.render(document, stamp)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }

    /// Register only the images the document actually places.
    fn register_images(
        &self,
        doc: &mut PdfDocument,
        document: &Document,
    ) -> BTreeMap<ImageRef, PlacedImage> {
        let mut images = BTreeMap::new();
        for command in document.pages().iter().flat_map(|p| p.all_commands()) {
            let DrawCommand::Image { image, .. } = command else {
                continue;
            };
            if images.contains_key(image) {
                continue;
            }
            let Some(decoded) = self.assets.image(*image) else {
                warn!(?image, "placed image has no asset");
                continue;
            };
            let raw = raw_image(decoded);
            let id = doc.add_image(&raw);
            images.insert(
                *image,
                PlacedImage {
                    id,
                    width: decoded.width,
                    height: decoded.height,
                },
            );
        }
        images
    }
}

/// Wrap already decoded RGB8 pixels for printpdf.
fn raw_image(decoded: &DecodedImage) -> RawImage {
    RawImage {
        pixels: RawImageData::U8(decoded.rgb.to_vec()),
        width: decoded.width,
        height: decoded.height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

fn command_ops(
    command: &DrawCommand,
    font: &FontId,
    images: &BTreeMap<ImageRef, PlacedImage>,
) -> Vec<Op> {
    match command {
        DrawCommand::Text {
            content,
            x,
            y,
            size,
            color,
        } => vec![
            Op::SetFillColor { col: rgb(*color) },
            Op::StartTextSection,
            Op::SetTextCursor {
                pos: point(*x, *y),
            },
            Op::SetFontSize {
                size: Pt(*size),
                font: font.clone(),
            },
            Op::WriteText {
                items: vec![TextItem::Text(content.clone())],
                font: font.clone(),
            },
            Op::EndTextSection,
        ],
        DrawCommand::Image { image, x, y, w, h } => match images.get(image) {
            Some(placed) => vec![Op::UseXobject {
                id: placed.id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(*x)),
                    translate_y: Some(Pt(*y)),
                    // At 72 dpi one pixel is one point.
                    scale_x: Some(w / placed.width.max(1) as f32),
                    scale_y: Some(h / placed.height.max(1) as f32),
                    dpi: Some(72.0),
                    rotate: None,
                },
            }],
            None => Vec::new(),
        },
        other => shape_ops(other),
    }
}

/// Ops for rectangles and lines.
fn shape_ops(command: &DrawCommand) -> Vec<Op> {
    match command {
        DrawCommand::Rectangle {
            x,
            y,
            w,
            h,
            fill,
            border_color,
            border_width,
        } => {
            let mode = match (fill.is_some(), border_color.is_some()) {
                (true, true) => PaintMode::FillStroke,
                (true, false) => PaintMode::Fill,
                (false, true) => PaintMode::Stroke,
                (false, false) => return Vec::new(),
            };
            let mut ops = vec![Op::SaveGraphicsState];
            if let Some(fill) = fill {
                ops.push(Op::SetFillColor { col: rgb(*fill) });
            }
            if let Some(border) = border_color {
                ops.push(Op::SetOutlineColor { col: rgb(*border) });
                ops.push(Op::SetOutlineThickness {
                    pt: Pt(border_width.unwrap_or(1.0)),
                });
            }
            let corners = [(*x, *y), (x + w, *y), (x + w, y + h), (*x, y + h)];
            ops.push(Op::DrawPolygon {
                polygon: Polygon {
                    rings: vec![PolygonRing {
                        points: corners
                            .into_iter()
                            .map(|(px, py)| LinePoint {
                                p: point(px, py),
                                bezier: false,
                            })
                            .collect(),
                    }],
                    mode,
                    winding_order: WindingOrder::NonZero,
                },
            });
            ops.push(Op::RestoreGraphicsState);
            ops
        }
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            thickness,
            color,
        } => vec![
            Op::SaveGraphicsState,
            Op::SetOutlineColor { col: rgb(*color) },
            Op::SetOutlineThickness { pt: Pt(*thickness) },
            Op::DrawLine {
                line: Line {
                    points: vec![
                        LinePoint {
                            p: point(*x1, *y1),
                            bezier: false,
                        },
                        LinePoint {
                            p: point(*x2, *y2),
                            bezier: false,
                        },
                    ],
                    is_closed: false,
                },
            },
            Op::RestoreGraphicsState,
        ],
        DrawCommand::Text { .. } | DrawCommand::Image { .. } => Vec::new(),
    }
}

fn rgb(color: Color) -> PdfColor {
    let (r, g, b) = color.to_unit();
    PdfColor::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

fn point(x: f32, y: f32) -> Point {
    Point { x: Pt(x), y: Pt(y) }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::{bundle, fake_font};

    #[test]
    fn header_only_font_is_rejected() {
        let config = LayoutConfig::default();
        let assets = AssetBundle::new(fake_font(), None, None).unwrap();
        assert!(matches!(
            PdfRenderer::new(&config, &assets),
            Err(UrkundeError::InvalidFont(_))
        ));
    }

    #[test]
    fn bundled_logo_is_embedded_as_rgb8() {
        let assets = bundle(true, false);
        let decoded = assets.image(ImageRef::Logo).unwrap();
        let raw = raw_image(decoded);
        assert_eq!((raw.width, raw.height), (4, 4));
        match raw.pixels {
            RawImageData::U8(pixels) => assert_eq!(pixels.len(), 4 * 4 * 3),
            _ => panic!("expected 8-bit pixels"),
        }
    }

    #[test]
    fn stamp_values_sit_right_of_labels() {
        let config = LayoutConfig::default();
        let planner = OverlayFieldPlanner::new(&config);
        let stamp = Stamp {
            student_name: "홍길동".into(),
            issue_date: "2026. 10. 18.".into(),
        };
        let commands = stamp.commands(&config);
        assert_eq!(commands.len(), 2);
        for (name, command) in OverlayFieldName::ALL.into_iter().zip(&commands) {
            let (label_x, label_y) = planner.field_position(name);
            match command {
                DrawCommand::Text { content, x, y, .. } => {
                    assert_eq!(content, stamp.value(name));
                    assert!(*x > label_x + config.overlay_label_width);
                    assert_eq!(*y, label_y);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn empty_stamp_values_are_skipped() {
        let stamp = Stamp {
            student_name: "홍길동".into(),
            issue_date: String::new(),
        };
        assert_eq!(stamp.commands(&LayoutConfig::default()).len(), 1);
    }

    #[test]
    fn rectangle_paint_mode_follows_fill_and_border() {
        let both = DrawCommand::block(10.0, 20.0, 30.0)
            .filled(Color::WHITE)
            .bordered(Color::BLACK, 1.0);
        assert!(shape_ops(&both).iter().any(|op| matches!(
            op,
            Op::DrawPolygon { polygon: Polygon { mode: PaintMode::FillStroke, .. } }
        )));

        let outline = DrawCommand::block(10.0, 20.0, 30.0).bordered(Color::BLACK, 1.0);
        assert!(shape_ops(&outline).iter().any(|op| matches!(
            op,
            Op::DrawPolygon { polygon: Polygon { mode: PaintMode::Stroke, .. } }
        )));

        assert!(shape_ops(&DrawCommand::block(0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn line_is_one_stroked_segment() {
        let line = DrawCommand::Line {
            x1: 0.0,
            y1: 5.0,
            x2: 100.0,
            y2: 5.0,
            thickness: 0.8,
            color: Color::BLACK,
        };
        let ops = shape_ops(&line);
        let lines = ops.iter().filter(|op| matches!(op, Op::DrawLine { .. })).count();
        assert_eq!(lines, 1);
    }

    #[test]
    fn a4_converts_to_millimetres() {
        let Mm(width) = pt_to_mm(595.28);
        assert!((width - 210.0).abs() < 0.01);
    }
}
