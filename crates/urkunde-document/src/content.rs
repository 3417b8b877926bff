// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Template content: the static text each template lays out.
//
// Content is data, not code: a built-in catalogue ships with the crate and
// can be replaced wholesale from a JSON file, so wording changes never touch
// the pagination logic.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::{EducationCategory, ImageRef, Template};

use crate::overlay::OverlayLabels;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// One unit of flowing content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    SectionHeader { title: String },
    ModuleGroup { title: String, bullets: Vec<String> },
    Paragraph { text: String },
    /// One table row. Consecutive rows form a table; the first is its header.
    TableRow { cells: Vec<String> },
    ImageBlock { image: ImageRef, width: f32, height: f32 },
}

/// Signature block text at the end of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Closing {
    pub statement: String,
    pub signatory: String,
}

/// Everything a content builder needs to lay out one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentContent {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub intro: String,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    /// Blocks that start on a page of their own after `blocks`. Assessment
    /// reports put their evaluation here.
    #[serde(default)]
    pub evaluation: Vec<ContentBlock>,
    pub closing: Closing,
}

/// A course module: a header and its bullet points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Certificate content for one education category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationContent {
    /// Course name, used as the section header in combined certificates.
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub intro: String,
    pub modules: Vec<Module>,
    pub closing: Closing,
}

impl EducationContent {
    fn module_blocks(&self) -> impl Iterator<Item = ContentBlock> + '_ {
        self.modules.iter().map(|m| ContentBlock::ModuleGroup {
            title: m.title.clone(),
            bullets: m.bullets.clone(),
        })
    }
}

/// Shared front matter for the combined education certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedEducation {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub intro: String,
    pub closing: Closing,
}

/// Immutable catalogue of all template content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCatalog {
    /// Issuing institution, printed under the closing statement.
    pub issuer: String,
    #[serde(default)]
    pub labels: OverlayLabels,
    /// Non-education templates keyed by template id.
    documents: BTreeMap<String, DocumentContent>,
    education: BTreeMap<EducationCategory, EducationContent>,
    combined_education: CombinedEducation,
}

impl ContentCatalog {
    /// The catalogue compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        debug!(
            documents = catalog.documents.len(),
            categories = catalog.education.len(),
            "loaded content catalogue"
        );
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Add or replace the content of a non-education template.
    pub fn insert_document(&mut self, template: &Template, content: DocumentContent) {
        self.documents.insert(template.to_string(), content);
    }

    pub fn education(&self, category: EducationCategory) -> Result<&EducationContent> {
        self.education
            .get(&category)
            .ok_or_else(|| UrkundeError::MissingContent(format!("education:{}", category.key())))
    }

    /// Resolve the content for one template.
    ///
    /// A combined certificate keeps the shared intro and closing and lays the
    /// two categories' modules out one after the other, each under its
    /// course name.
    pub fn resolve(&self, template: &Template) -> Result<DocumentContent> {
        match template {
            Template::Education(category) => {
                let content = self.education(*category)?;
                Ok(DocumentContent {
                    title: content.title.clone(),
                    subtitle: content.subtitle.clone(),
                    intro: content.intro.clone(),
                    blocks: content.module_blocks().collect(),
                    evaluation: Vec::new(),
                    closing: content.closing.clone(),
                })
            }
            Template::CombinedEducation(first, second) => {
                let first = self.education(*first)?;
                let second = self.education(*second)?;
                let mut blocks = Vec::new();
                for part in [first, second] {
                    blocks.push(ContentBlock::SectionHeader {
                        title: part.name.clone(),
                    });
                    blocks.extend(part.module_blocks());
                }
                let shared = &self.combined_education;
                Ok(DocumentContent {
                    title: shared.title.clone(),
                    subtitle: shared.subtitle.clone(),
                    intro: shared.intro.clone(),
                    blocks,
                    evaluation: Vec::new(),
                    closing: shared.closing.clone(),
                })
            }
            other => {
                let id = other.to_string();
                self.documents
                    .get(&id)
                    .cloned()
                    .ok_or(UrkundeError::MissingContent(id))
            }
        }
    }
}
