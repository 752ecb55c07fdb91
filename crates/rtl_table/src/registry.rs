//! Explicit component registration.
//!
//! Hosts create one [`ComponentRegistry`] at startup, define the tags they
//! need, and instantiate widgets through it. Nothing is registered implicitly.

use tracing::info;

use crate::config::WidgetConfig;
use crate::error::{Error, Result};
use crate::surface::Surface;
use crate::widget::DynamicTable;

/// Names the HTML standard reserves even though they contain a hyphen.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Checks `tag` against the custom element naming rules.
pub fn validate_tag_name(tag: &str) -> Result<()> {
    let starts_lower = tag.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let valid_chars = tag.chars().all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_') || !c.is_ascii()
    });

    if starts_lower && valid_chars && tag.contains('-') && !RESERVED_NAMES.contains(&tag) {
        Ok(())
    } else {
        Err(Error::InvalidTagName(tag.to_string()))
    }
}

/// Registry of defined widget tags and their configuration.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    definitions: Vec<WidgetConfig>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a widget under `config.tag_name`.
    ///
    /// Fails if the name is invalid or already taken.
    pub fn define(&mut self, config: WidgetConfig) -> Result<()> {
        validate_tag_name(&config.tag_name)?;
        if self.is_defined(&config.tag_name) {
            return Err(Error::AlreadyDefined(config.tag_name));
        }
        info!(tag = %config.tag_name, "defined widget");
        self.definitions.push(config);
        Ok(())
    }

    /// Whether `tag` has been defined.
    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Configuration registered for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&WidgetConfig> {
        self.definitions.iter().find(|c| c.tag_name == tag)
    }

    /// Defined tags in definition order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|c| c.tag_name.as_str())
    }

    /// Instantiates the widget defined for `tag` on `surface`.
    pub fn create<S: Surface>(&self, tag: &str, surface: S) -> Result<DynamicTable<S>> {
        let config = self
            .get(tag)
            .ok_or_else(|| Error::UnknownTag(tag.to_string()))?;
        Ok(DynamicTable::with_config(config.clone(), surface))
    }
}
