// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tabular documents: risk assessment, practice diary, change report.

use tracing::debug;

use urkunde_core::error::{Result, UrkundeError};

use super::BuildRequest;
use super::blocks::{self, SignOff, TableStyle};
use crate::layout::LayoutEngine;
use crate::theme::Theme;

/// Area, criterion, points.
const CRITERIA_COLUMNS: TableStyle<'static> = TableStyle {
    columns: &[0.2, 0.65, 0.15],
};
/// Area, level, remarks.
const EVALUATION_COLUMNS: TableStyle<'static> = TableStyle {
    columns: &[0.2, 0.15, 0.65],
};
const DIARY_COLUMNS: TableStyle<'static> = TableStyle {
    columns: &[0.18, 0.41, 0.41],
};
const CHANGE_COLUMNS: TableStyle<'static> = TableStyle {
    columns: &[0.16, 0.42, 0.42],
};

fn build_report(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
    table: TableStyle<'_>,
    sign_off: SignOff,
) -> Result<()> {
    let content = request.content;
    blocks::preflight(engine, &content.blocks)?;
    blocks::draw_header(engine, theme, request, false);
    blocks::draw_overlay_band(engine, theme, request);
    blocks::draw_paragraph(engine, theme, &content.intro)?;
    blocks::draw_blocks(engine, theme, request, &content.blocks, table)?;
    blocks::draw_closing(engine, theme, request, sign_off)
}

/// Risk assessment report.
///
/// The criteria table fills page 1 onward; the evaluation always starts on a
/// page of its own, followed by the sealed closing.
pub fn build_assessment(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
) -> Result<()> {
    let content = request.content;
    if content.evaluation.is_empty() {
        return Err(UrkundeError::MissingContent(format!(
            "{}: evaluation",
            request.template
        )));
    }
    blocks::preflight(engine, &content.blocks)?;
    blocks::preflight(engine, &content.evaluation)?;

    blocks::draw_header(engine, theme, request, false);
    blocks::draw_overlay_band(engine, theme, request);
    blocks::draw_paragraph(engine, theme, &content.intro)?;
    blocks::draw_blocks(engine, theme, request, &content.blocks, CRITERIA_COLUMNS)?;

    engine.begin_page();
    debug!(page = engine.page_number(), "evaluation page");
    blocks::draw_blocks(engine, theme, request, &content.evaluation, EVALUATION_COLUMNS)?;
    blocks::draw_closing(engine, theme, request, SignOff::Seal)
}

/// Weekly practice diary, signed by the student.
pub fn build_practice_diary(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
) -> Result<()> {
    build_report(
        engine,
        theme,
        request,
        DIARY_COLUMNS,
        SignOff::SignatureLine { with_issuer: false },
    )
}

/// Before/after change report, sealed by the institution.
pub fn build_change_report(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
) -> Result<()> {
    build_report(engine, theme, request, CHANGE_COLUMNS, SignOff::Seal)
}
