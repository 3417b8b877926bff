// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Education certificates, single-category and combined.

use tracing::debug;

use urkunde_core::error::Result;
use urkunde_core::types::Template;

use super::BuildRequest;
use super::blocks::{self, SignOff, TableStyle};
use crate::layout::LayoutEngine;
use crate::theme::Theme;

/// Certificate of completion for one or two education categories.
///
/// Content for a combined certificate arrives already concatenated (one
/// intro, then each category's modules under its course name), so both
/// shapes share this builder.
pub fn build_education(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
) -> Result<()> {
    let content = request.content;
    blocks::preflight(engine, &content.blocks)?;

    if let Template::CombinedEducation(first, second) = request.template {
        debug!(first = first.key(), second = second.key(), "combined certificate");
    }

    blocks::draw_header(engine, theme, request, true);
    blocks::draw_overlay_band(engine, theme, request);
    blocks::draw_paragraph(engine, theme, &content.intro)?;
    blocks::draw_blocks(engine, theme, request, &content.blocks, TableStyle::EVEN)?;
    blocks::draw_closing(engine, theme, request, SignOff::Seal)
}

#[cfg(test)]
mod tests {
    use crate::assemble::DocumentGenerator;
    use crate::assemble::blocks::preflight;
    use crate::assets::tests::bundle;
    use crate::content::ContentBlock;
    use crate::layout::{Document, DrawCommand, LayoutEngine, wrap};
    use crate::theme::ThemeRegistry;
    use urkunde_core::{LayoutConfig, PagePoint};
    use urkunde_core::error::UrkundeError;
    use urkunde_core::types::{EducationCategory, ImageRef, Template, TemplateFamily};

    fn text_page(document: &Document, needle: &str) -> (usize, f32) {
        let (page, cmd) = document
            .find_text(needle)
            .unwrap_or_else(|| panic!("{needle:?} not drawn"));
        match cmd {
            DrawCommand::Text { y, .. } => (page, *y),
            other => panic!("unexpected {other:?}"),
        }
    }

    /// Push the body start down so the first module header lands at the
    /// bottom of page 1 with less than one bullet line of room below it.
    #[test]
    fn module_header_and_bullets_split_across_pages() {
        let base = LayoutConfig::default();
        let generator = DocumentGenerator::builtin().unwrap();
        let category = EducationCategory::DrunkDriving;
        let content = generator.catalog().education(category).unwrap().clone();
        let intro_lines = wrap(&content.intro, base.paragraph_wrap_chars).len();

        // Space the intro consumes, then leave header height + 5pt.
        let intro_height = intro_lines as f32 * base.paragraph_line_height + base.paragraph_gap;
        let (_, height) = base.page_size();
        let body_top = base.bottom_margin + intro_height + base.module_header_height + 5.0;
        let config = LayoutConfig {
            body_top_offset: height - body_top,
            student_name_field: PagePoint { x: 70.0, y: body_top + 20.0 },
            issue_date_field: PagePoint { x: 320.0, y: body_top + 20.0 },
            ..base
        };
        let generator = DocumentGenerator::new(
            config.clone(),
            ThemeRegistry::default(),
            generator.catalog().clone(),
        )
        .unwrap();

        let document = generator
            .generate(&Template::Education(category), &bundle(true, true))
            .unwrap();

        let module = &content.modules[0];
        let (header_page, header_y) = text_page(&document, &module.title);
        assert_eq!(header_page, 1);
        assert!(header_y >= config.bottom_margin);

        // Header alone at the bottom of page 1: no bullet of its module there.
        let page_one: Vec<&str> = document.pages()[0].texts().collect();
        for bullet in &module.bullets {
            assert!(!page_one.contains(&bullet.as_str()));
        }

        // All three bullets start at the top of page 2.
        let first_line: String = module.bullets[0]
            .chars()
            .take(config.bullet_wrap_chars)
            .collect();
        let (bullet_page, bullet_y) = text_page(&document, &first_line);
        assert_eq!(bullet_page, 2);
        assert_eq!(bullet_y, config.page_top() - config.bullet_size);
        for bullet in &module.bullets {
            let start: String = bullet.chars().take(config.bullet_wrap_chars).collect();
            assert_eq!(text_page(&document, &start).0, 2);
        }
    }

    #[test]
    fn combined_certificate_outgrows_either_category() {
        let generator = DocumentGenerator::builtin().unwrap();
        let assets = bundle(true, true);
        let first = EducationCategory::SexualOffense;
        let second = EducationCategory::DomesticViolence;

        let a = generator.generate(&Template::Education(first), &assets).unwrap();
        let b = generator.generate(&Template::Education(second), &assets).unwrap();
        let combined = generator
            .generate(&Template::CombinedEducation(first, second), &assets)
            .unwrap();

        assert!(combined.page_count() > a.page_count());
        assert!(combined.page_count() > b.page_count());

        let theme = ThemeRegistry::default()
            .theme_for(TemplateFamily::Education)
            .unwrap();
        for page in combined.pages() {
            assert!(page.frame().iter().any(|cmd| matches!(
                cmd,
                DrawCommand::Rectangle { border_color: Some(c), .. } if *c == theme.border
            )));
        }
    }

    #[test]
    fn combined_certificate_has_one_intro() {
        let generator = DocumentGenerator::builtin().unwrap();
        let template =
            Template::CombinedEducation(EducationCategory::Drugs, EducationCategory::Fraud);
        let document = generator.generate(&template, &bundle(false, false)).unwrap();
        let drugs_intro = &generator.catalog().education(EducationCategory::Drugs).unwrap().intro;
        let first_line: String = drugs_intro.chars().take(20).collect();
        assert!(document.find_text(&first_line).is_none());
        assert!(document.find_text("마약류 재범예방 교육").is_some());
        assert!(document.find_text("사기 재범예방 교육").is_some());
    }

    #[test]
    fn seal_drawn_only_when_supplied() {
        let generator = DocumentGenerator::builtin().unwrap();
        let template = Template::Education(EducationCategory::Gambling);
        let has_seal = |doc: &Document| {
            doc.pages().iter().any(|p| {
                p.commands()
                    .iter()
                    .any(|c| matches!(c, DrawCommand::Image { image: ImageRef::Seal, .. }))
            })
        };
        assert!(has_seal(&generator.generate(&template, &bundle(false, true)).unwrap()));
        assert!(!has_seal(&generator.generate(&template, &bundle(false, false)).unwrap()));
    }

    #[test]
    fn oversized_module_is_reported() {
        let config = LayoutConfig::default();
        let theme = ThemeRegistry::default()
            .theme_for(TemplateFamily::Education)
            .unwrap();
        let engine = LayoutEngine::new(&config, theme);
        let bullets = vec!["항목".to_string(); 60];
        let blocks = vec![ContentBlock::ModuleGroup {
            title: "과다 모듈".into(),
            bullets,
        }];
        assert!(matches!(
            preflight(&engine, &blocks),
            Err(UrkundeError::LayoutOverflow { .. })
        ));
    }
}
