// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The fixed document catalogue produced by one batch run.

use urkunde_core::error::Result;
use urkunde_core::types::{
    EducationCategory, PetitionVariant, ReflectionVariant, Template,
};

/// Every document a full run produces: the eight letters and reports, one
/// certificate per education category, and the two combined certificates
/// issued in practice.
pub fn batch_catalogue() -> Vec<Template> {
    let mut templates = vec![
        Template::Assessment,
        Template::Opinion,
        Template::Petition(PetitionVariant::Standard),
        Template::Petition(PetitionVariant::Counselor),
        Template::Reflection(ReflectionVariant::Counseling),
        Template::Reflection(ReflectionVariant::Completion),
        Template::PracticeDiary,
        Template::ChangeReport,
    ];
    templates.extend(EducationCategory::ALL.into_iter().map(Template::Education));
    templates.push(Template::CombinedEducation(
        EducationCategory::DrunkDriving,
        EducationCategory::TrafficSafety,
    ));
    templates.push(Template::CombinedEducation(
        EducationCategory::Violence,
        EducationCategory::AngerManagement,
    ));
    templates
}

/// Restrict the catalogue to the given template ids, keeping catalogue
/// order. An empty filter keeps everything; an unparseable id is an error.
pub fn select(ids: &[String]) -> Result<Vec<Template>> {
    let all = batch_catalogue();
    if ids.is_empty() {
        return Ok(all);
    }
    let wanted = ids
        .iter()
        .map(|id| id.parse::<Template>())
        .collect::<Result<Vec<_>>>()?;
    let mut selected: Vec<Template> = all.into_iter().filter(|t| wanted.contains(t)).collect();
    // Ids outside the fixed catalogue (other combined pairs) are allowed.
    for template in wanted {
        if !selected.contains(&template) {
            selected.push(template);
        }
    }
    Ok(selected)
}
