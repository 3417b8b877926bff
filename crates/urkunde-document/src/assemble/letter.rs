// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Prose documents: opinion letters, petitions, reflection essays.

use urkunde_core::error::Result;
use urkunde_core::types::{PetitionVariant, Template};

use super::BuildRequest;
use super::blocks::{self, SignOff, TableStyle};
use crate::layout::LayoutEngine;
use crate::theme::Theme;

/// Intro, body, closing. Shared by every letter shape.
fn build_letter(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
    sign_off: SignOff,
) -> Result<()> {
    let content = request.content;
    blocks::preflight(engine, &content.blocks)?;
    blocks::draw_header(engine, theme, request, false);
    blocks::draw_overlay_band(engine, theme, request);
    blocks::draw_paragraph(engine, theme, &content.intro)?;
    blocks::draw_blocks(engine, theme, request, &content.blocks, TableStyle::EVEN)?;
    blocks::draw_closing(engine, theme, request, sign_off)
}

/// Instructor's opinion letter, signed by hand on behalf of the institution.
pub fn build_opinion(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
) -> Result<()> {
    build_letter(
        engine,
        theme,
        request,
        SignOff::SignatureLine { with_issuer: true },
    )
}

/// Petition for leniency. The counselor variant swaps the institutional
/// seal for a personal signature line.
pub fn build_petition(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
) -> Result<()> {
    let sign_off = match request.template {
        Template::Petition(PetitionVariant::Counselor) => {
            SignOff::SignatureLine { with_issuer: true }
        }
        _ => SignOff::Seal,
    };
    build_letter(engine, theme, request, sign_off)
}

/// Reflection essay, written and signed by the student.
pub fn build_reflection(
    engine: &mut LayoutEngine<'_>,
    theme: &Theme,
    request: &BuildRequest<'_>,
) -> Result<()> {
    build_letter(
        engine,
        theme,
        request,
        SignOff::SignatureLine { with_issuer: false },
    )
}
