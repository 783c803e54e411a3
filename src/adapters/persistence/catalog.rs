//! Implements GroupStore and TemplateStore over a JSON catalog.
//!
//! One document holds the group forest (nested trees) and the email templates:
//! `{ "groups": [...], "templates": [...] }`. `JsonCatalogStore` reads the file on first use
//! and keeps it for the rest of the process; read-only afterwards.

use crate::domain::{DomainError, Group, MessageTemplate};
use crate::ports::{GroupStore, TemplateStore};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::info;

/// In-memory catalog of group trees and templates.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    templates: Vec<MessageTemplate>,
}

impl Catalog {
    pub fn new(groups: Vec<Group>, templates: Vec<MessageTemplate>) -> Self {
        Self { groups, templates }
    }

    /// Load the catalog file. A missing file is an error: the job cannot run without groups.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::Store(format!(
                    "catalog not found: {}",
                    path.display()
                )));
            }
            Err(e) => return Err(DomainError::Store(e.to_string())),
        };
        let catalog: Self = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Store(format!("parse {}: {}", path.display(), e)))?;
        info!(
            path = %path.display(),
            root_groups = catalog.groups.len(),
            templates = catalog.templates.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Depth-first search over the whole forest. Uses an explicit stack; trees are owned,
    /// so every node is visited at most once.
    fn find_group(&self, group_id: &str) -> Option<&Group> {
        let mut stack: Vec<&Group> = self.groups.iter().rev().collect();
        while let Some(group) = stack.pop() {
            if group.id == group_id {
                return Some(group);
            }
            stack.extend(group.children.iter().rev());
        }
        None
    }
}

#[async_trait::async_trait]
impl GroupStore for Catalog {
    async fn load_group(&self, group_id: &str) -> Result<Group, DomainError> {
        self.find_group(group_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("group {}", group_id)))
    }
}

#[async_trait::async_trait]
impl TemplateStore for Catalog {
    async fn load_template(&self, template_id: &str) -> Result<MessageTemplate, DomainError> {
        self.templates
            .iter()
            .find(|t| t.id == template_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("template {}", template_id)))
    }
}

/// File-backed store. The catalog is read lazily so a run that exits early never touches disk.
pub struct JsonCatalogStore {
    path: PathBuf,
    cache: OnceCell<Catalog>,
}

impl JsonCatalogStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: OnceCell::new(),
        }
    }

    async fn catalog(&self) -> Result<&Catalog, DomainError> {
        self.cache
            .get_or_try_init(|| Catalog::load(&self.path))
            .await
    }
}

#[async_trait::async_trait]
impl GroupStore for JsonCatalogStore {
    async fn load_group(&self, group_id: &str) -> Result<Group, DomainError> {
        self.catalog().await?.load_group(group_id).await
    }
}

#[async_trait::async_trait]
impl TemplateStore for JsonCatalogStore {
    async fn load_template(&self, template_id: &str) -> Result<MessageTemplate, DomainError> {
        self.catalog().await?.load_template(template_id).await
    }
}
