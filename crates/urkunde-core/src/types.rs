// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: templates, families, colors, paper sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UrkundeError;

/// Millimetres to PDF points.
const PT_PER_MM: f32 = 72.0 / 25.4;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0` for PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Dimensions in PDF points (width, height).
    ///
    /// A4 uses the exact ISO size in points rather than the rounded
    /// millimetre figure, so page geometry matches common PDF tooling.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            Self::A4 => (595.28, 841.89),
            other => {
                let (w, h) = other.dimensions_mm();
                (w as f32 * PT_PER_MM, h as f32 * PT_PER_MM)
            }
        }
    }
}

/// A group of templates that share one theme and one content builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateFamily {
    Education,
    Assessment,
    Opinion,
    Petition,
    Reflection,
    PracticeDiary,
    ChangeReport,
}

impl TemplateFamily {
    pub const ALL: [TemplateFamily; 7] = [
        Self::Education,
        Self::Assessment,
        Self::Opinion,
        Self::Petition,
        Self::Reflection,
        Self::PracticeDiary,
        Self::ChangeReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Assessment => "assessment",
            Self::Opinion => "opinion",
            Self::Petition => "petition",
            Self::Reflection => "reflection",
            Self::PracticeDiary => "practice-diary",
            Self::ChangeReport => "change-report",
        }
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course categories that each have their own education certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationCategory {
    DrunkDriving,
    Violence,
    SexualOffense,
    Drugs,
    Gambling,
    Theft,
    Fraud,
    TrafficSafety,
    AngerManagement,
    DomesticViolence,
}

impl EducationCategory {
    pub const ALL: [EducationCategory; 10] = [
        Self::DrunkDriving,
        Self::Violence,
        Self::SexualOffense,
        Self::Drugs,
        Self::Gambling,
        Self::Theft,
        Self::Fraud,
        Self::TrafficSafety,
        Self::AngerManagement,
        Self::DomesticViolence,
    ];

    /// Stable identifier used in template ids and catalogue keys.
    pub fn key(&self) -> &'static str {
        match self {
            Self::DrunkDriving => "drunk-driving",
            Self::Violence => "violence",
            Self::SexualOffense => "sexual-offense",
            Self::Drugs => "drugs",
            Self::Gambling => "gambling",
            Self::Theft => "theft",
            Self::Fraud => "fraud",
            Self::TrafficSafety => "traffic-safety",
            Self::AngerManagement => "anger-management",
            Self::DomesticViolence => "domestic-violence",
        }
    }
}

impl FromStr for EducationCategory {
    type Err = UrkundeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UrkundeError::UnknownTemplate(format!("education category {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetitionVariant {
    /// Signed by the institution, closed with the official seal.
    Standard,
    /// Signed by an individual counselor on a handwritten signature line.
    Counselor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectionVariant {
    Counseling,
    Completion,
}

/// One document shape.
///
/// The string form (`Display` / `FromStr`) is the template id used by callers
/// and by the batch catalogue, e.g. `education:drugs` or
/// `combined-education:drunk-driving+anger-management`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    Assessment,
    Opinion,
    Petition(PetitionVariant),
    Reflection(ReflectionVariant),
    PracticeDiary,
    ChangeReport,
    Education(EducationCategory),
    CombinedEducation(EducationCategory, EducationCategory),
}

impl Template {
    pub fn family(&self) -> TemplateFamily {
        match self {
            Self::Assessment => TemplateFamily::Assessment,
            Self::Opinion => TemplateFamily::Opinion,
            Self::Petition(_) => TemplateFamily::Petition,
            Self::Reflection(_) => TemplateFamily::Reflection,
            Self::PracticeDiary => TemplateFamily::PracticeDiary,
            Self::ChangeReport => TemplateFamily::ChangeReport,
            Self::Education(_) | Self::CombinedEducation(..) => TemplateFamily::Education,
        }
    }

    /// File-system friendly name for generated output.
    pub fn file_stem(&self) -> String {
        self.to_string().replace([':', '+'], "_")
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assessment => f.write_str("assessment"),
            Self::Opinion => f.write_str("opinion"),
            Self::Petition(PetitionVariant::Standard) => f.write_str("petition"),
            Self::Petition(PetitionVariant::Counselor) => f.write_str("petition-counselor"),
            Self::Reflection(ReflectionVariant::Counseling) => {
                f.write_str("reflection-counseling")
            }
            Self::Reflection(ReflectionVariant::Completion) => {
                f.write_str("reflection-completion")
            }
            Self::PracticeDiary => f.write_str("practice-diary"),
            Self::ChangeReport => f.write_str("change-report"),
            Self::Education(category) => write!(f, "education:{}", category.key()),
            Self::CombinedEducation(first, second) => {
                write!(f, "combined-education:{}+{}", first.key(), second.key())
            }
        }
    }
}

impl FromStr for Template {
    type Err = UrkundeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UrkundeError::UnknownTemplate(s.to_string());
        let template = match s {
            "assessment" => Self::Assessment,
            "opinion" => Self::Opinion,
            "petition" => Self::Petition(PetitionVariant::Standard),
            "petition-counselor" => Self::Petition(PetitionVariant::Counselor),
            "reflection-counseling" => Self::Reflection(ReflectionVariant::Counseling),
            "reflection-completion" => Self::Reflection(ReflectionVariant::Completion),
            "practice-diary" => Self::PracticeDiary,
            "change-report" => Self::ChangeReport,
            other => {
                if let Some(category) = other.strip_prefix("education:") {
                    Self::Education(category.parse().map_err(|_| unknown())?)
                } else if let Some(pair) = other.strip_prefix("combined-education:") {
                    let (first, second) = pair.split_once('+').ok_or_else(unknown)?;
                    let first: EducationCategory = first.parse().map_err(|_| unknown())?;
                    let second: EducationCategory = second.parse().map_err(|_| unknown())?;
                    if first == second {
                        return Err(unknown());
                    }
                    Self::CombinedEducation(first, second)
                } else {
                    return Err(unknown());
                }
            }
        };
        Ok(template)
    }
}

/// The two stamping slots shared by every template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayFieldName {
    StudentName,
    IssueDate,
}

impl OverlayFieldName {
    pub const ALL: [OverlayFieldName; 2] = [Self::StudentName, Self::IssueDate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StudentName => "student-name",
            Self::IssueDate => "issue-date",
        }
    }
}

/// Binary image assets a document may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageRef {
    Logo,
    Seal,
}
