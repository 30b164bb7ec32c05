//! Reference catalog
//!
//! Immutable lookup tables that drive the wizard: categories, the structures
//! offered in each, per-structure features, legal requirements and contact
//! routing. Loaded once at startup from TOML (or the built-in copy) and then
//! shared read-only by every session.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Built-in catalog embedded at compile time
const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.toml");

/// Where to route outreach for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRoute {
    /// Phone-style identifier, optionally with a leading `+`
    pub identifier: String,
    /// Short label shown on the contact button
    pub label: String,
}

/// One category with everything shown beneath it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Category key, also its display name
    pub name: String,

    /// Ordered structure names offered at the subtype step
    pub structures: Vec<String>,

    /// Legal requirements that apply to every structure in the category
    #[serde(default)]
    pub legal: Vec<String>,

    /// Market the benefits describe, shown above them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits_label: Option<String>,

    /// Market benefits (optional)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,

    /// Contact routing
    pub contact: ContactRoute,

    /// Features keyed by structure; structures may be absent
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,
}

/// The full reference catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    /// Services listed on every details screen
    #[serde(default)]
    support_services: Vec<String>,

    /// Categories in display order
    #[serde(rename = "category")]
    categories: Vec<CategoryEntry>,
}

impl ReferenceCatalog {
    /// Build a catalog from parts, validating it
    pub fn new(categories: Vec<CategoryEntry>, support_services: Vec<String>) -> Result<Self> {
        let catalog = Self {
            support_services,
            categories,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: ReferenceCatalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(catalog = %path.display(), "Loading catalog");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, otherwise use the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                debug!("Using built-in catalog");
                Self::builtin()
            }
        }
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check structural invariants
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Catalog("catalog defines no categories".into()));
        }

        let mut seen = HashSet::new();
        for entry in &self.categories {
            if entry.name.trim().is_empty() {
                return Err(Error::Catalog("category with empty name".into()));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::Catalog(format!(
                    "duplicate category '{}'",
                    entry.name
                )));
            }
            if entry.structures.is_empty() {
                return Err(Error::Catalog(format!(
                    "category '{}' has no structures",
                    entry.name
                )));
            }

            let mut structures = HashSet::new();
            for structure in &entry.structures {
                if !structures.insert(structure.as_str()) {
                    return Err(Error::Catalog(format!(
                        "duplicate structure '{}' in category '{}'",
                        structure, entry.name
                    )));
                }
            }

            if entry.contact.identifier.trim().is_empty() {
                return Err(Error::Catalog(format!(
                    "category '{}' has an empty contact identifier",
                    entry.name
                )));
            }

            for key in entry.features.keys() {
                if !structures.contains(key.as_str()) {
                    warn!(
                        category = %entry.name,
                        structure = %key,
                        "Features listed for a structure the category does not offer"
                    );
                }
            }
        }

        Ok(())
    }

    /// Category names in display order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Owned copy of the category names
    pub fn category_names(&self) -> Vec<String> {
        self.categories().map(str::to_string).collect()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog has no categories (never true once validated)
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Look up a category entry
    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Structures offered in a category
    pub fn structures(&self, category: &str) -> Option<&[String]> {
        self.category(category).map(|c| c.structures.as_slice())
    }

    /// Features for a structure; `None` when the catalog has no entry
    pub fn features(&self, category: &str, structure: &str) -> Option<&[String]> {
        self.category(category)
            .and_then(|c| c.features.get(structure))
            .map(Vec::as_slice)
    }

    /// Legal requirements for a category
    pub fn legal_requirements(&self, category: &str) -> Option<&[String]> {
        self.category(category).map(|c| c.legal.as_slice())
    }

    /// Market benefits for a category (empty when none are listed)
    pub fn market_benefits(&self, category: &str) -> &[String] {
        self.category(category)
            .map(|c| c.benefits.as_slice())
            .unwrap_or_default()
    }

    /// Label of the market whose benefits a category shows
    pub fn market_label(&self, category: &str) -> Option<&str> {
        self.category(category)?.benefits_label.as_deref()
    }

    /// Contact routing for a category
    pub fn contact_route(&self, category: &str) -> Option<&ContactRoute> {
        self.category(category).map(|c| &c.contact)
    }

    /// Services shown on every details screen
    pub fn support_services(&self) -> &[String] {
        &self.support_services
    }
}
