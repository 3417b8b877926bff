// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly: turns a template id into a finished Document.
//
// Each template family registers one content builder. The generator resolves
// theme, builder, and content for a template, runs the builder against a
// fresh layout engine, and seals the result.

pub mod blocks;
pub mod certificate;
pub mod letter;
pub mod report;

use std::collections::BTreeMap;

use tracing::{info, instrument};

use urkunde_core::LayoutConfig;
use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::{Template, TemplateFamily};

use crate::assets::AssetBundle;
use crate::content::{ContentCatalog, DocumentContent};
use crate::layout::{Document, LayoutEngine};
use crate::overlay::{OverlayFieldPlanner, OverlayLabels};
use crate::theme::{Theme, ThemeRegistry};

/// Everything a builder reads besides the engine and theme.
pub struct BuildRequest<'a> {
    pub template: Template,
    pub content: &'a DocumentContent,
    pub assets: &'a AssetBundle,
    pub issuer: &'a str,
    pub labels: &'a OverlayLabels,
}

/// Lays out one template family onto the engine.
pub type ContentBuilder = fn(&mut LayoutEngine<'_>, &Theme, &BuildRequest<'_>) -> Result<()>;

/// Family-to-builder dispatch table.
#[derive(Clone)]
pub struct BuilderRegistry {
    builders: BTreeMap<TemplateFamily, ContentBuilder>,
}

impl BuilderRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// Register or replace the builder for a family.
    pub fn register(&mut self, family: TemplateFamily, builder: ContentBuilder) {
        self.builders.insert(family, builder);
    }

    pub fn builder_for(&self, family: TemplateFamily) -> Result<ContentBuilder> {
        self.builders
            .get(&family)
            .copied()
            .ok_or(UrkundeError::MissingBuilder(family))
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for family in TemplateFamily::ALL {
            let builder: ContentBuilder = match family {
                TemplateFamily::Education => certificate::build_education,
                TemplateFamily::Assessment => report::build_assessment,
                TemplateFamily::Opinion => letter::build_opinion,
                TemplateFamily::Petition => letter::build_petition,
                TemplateFamily::Reflection => letter::build_reflection,
                TemplateFamily::PracticeDiary => report::build_practice_diary,
                TemplateFamily::ChangeReport => report::build_change_report,
            };
            registry.register(family, builder);
        }
        registry
    }
}

/// Generates documents from shared, read-only configuration.
///
/// Holds no per-document state, so one generator can serve many threads.
pub struct DocumentGenerator {
    config: LayoutConfig,
    themes: ThemeRegistry,
    catalog: ContentCatalog,
    builders: BuilderRegistry,
}

impl DocumentGenerator {
    /// Rejects an invalid layout or a theme registry that misses any
    /// family, before anything is generated.
    pub fn new(config: LayoutConfig, themes: ThemeRegistry, catalog: ContentCatalog) -> Result<Self> {
        config.validate()?;
        themes.check_complete()?;
        Ok(Self {
            config,
            themes,
            catalog,
            builders: BuilderRegistry::default(),
        })
    }

    /// Default layout, default themes, built-in content.
    pub fn builtin() -> Result<Self> {
        Self::new(
            LayoutConfig::default(),
            ThemeRegistry::default(),
            ContentCatalog::builtin()?,
        )
    }

    pub fn with_builders(mut self, builders: BuilderRegistry) -> Self {
        self.builders = builders;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn overlay(&self) -> OverlayFieldPlanner<'_> {
        OverlayFieldPlanner::new(&self.config)
    }

    /// Lay out one template.
    #[instrument(skip(self, assets), fields(template = %template))]
    pub fn generate(&self, template: &Template, assets: &AssetBundle) -> Result<Document> {
        let family = template.family();
        let theme = self.themes.theme_for(family)?;
        let builder = self.builders.builder_for(family)?;
        let content = self.catalog.resolve(template)?;

        let mut engine = LayoutEngine::new(&self.config, theme);
        let request = BuildRequest {
            template: *template,
            content: &content,
            assets,
            issuer: &self.catalog.issuer,
            labels: &self.catalog.labels,
        };
        builder(&mut engine, &theme, &request)?;

        let document = engine.finish(*template, content.title.clone());
        info!(pages = document.page_count(), "generated document");
        Ok(document)
    }
}
