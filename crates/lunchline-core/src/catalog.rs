//! Read-only menu catalog.
//!
//! The operator maintains the menu as a TOML file (updating `todays_detail`
//! every morning). The core only reads it. Declaration order is kept and is
//! the order in which items appear in the order message.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{CatalogError, CoreError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub description: String,
    /// What the item is today, e.g. the main course of the day.
    #[serde(default)]
    pub todays_detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub extras: Vec<Extra>,
}

impl Catalog {
    /// The house menu shipped with the binary.
    pub fn builtin() -> Self {
        let item = |id: &str, name: &str, icon: &str, description: &str, detail: &str| MenuItem {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            description: description.into(),
            todays_detail: Some(detail.into()),
        };
        let extra = |id: &str, name: &str, icon: &str| Extra {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        };
        Self {
            items: vec![
                item("SOUP_ONLY", "Soup of the day", "🥣", "Hot soup only", "Cream of squash"),
                item("A", "Lunch A", "🍱", "Soup + Main A", "Stewed chicken with rice"),
                item("B", "Lunch B", "🍛", "Soup + Main B", "Beef stew"),
                item("MAIN_A", "Main A", "🍗", "Main only (no soup)", "Stewed chicken with rice"),
                item("MAIN_B", "Main B", "🥩", "Main only (no soup)", "Beef stew"),
            ],
            extras: vec![
                extra("JUICE", "Fresh juice", "🧃"),
                extra("DESSERT", "Dessert of the day", "🍰"),
            ],
        }
    }

    /// Load a menu file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingCatalog` if the file does not exist, and a
    /// `CatalogError` if it cannot be parsed or has empty/duplicate ids.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::MissingCatalog {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let catalog: Catalog = toml::from_str(&content).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        catalog.validate()?;
        tracing::debug!(
            path = %path.display(),
            items = catalog.items.len(),
            extras = catalog.extras.len(),
            "menu loaded"
        );
        Ok(catalog)
    }

    /// Load `path` if given, otherwise use the built-in menu.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Ids must be non-empty and unique within items and within extras.
    pub fn validate(&self) -> Result<(), CatalogError> {
        fn check<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
            let mut seen = HashSet::new();
            for id in ids {
                if id.trim().is_empty() {
                    return Err(CatalogError::EmptyId);
                }
                if !seen.insert(id) {
                    return Err(CatalogError::DuplicateId(id.to_string()));
                }
            }
            Ok(())
        }
        check(self.items.iter().map(|i| i.id.as_str()))?;
        check(self.extras.iter().map(|e| e.id.as_str()))
    }

    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn extra(&self, id: &str) -> Option<&Extra> {
        self.extras.iter().find(|e| e.id == id)
    }

    /// Position of an item in the menu, used to order message lines.
    pub fn item_position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn extra_position(&self, id: &str) -> Option<usize> {
        self.extras.iter().position(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_menu_is_valid() {
        let menu = Catalog::builtin();
        assert!(menu.validate().is_ok());
        assert_eq!(menu.items.len(), 5);
        assert_eq!(menu.extras.len(), 2);
        assert_eq!(
            menu.item("A").and_then(|i| i.todays_detail.as_deref()),
            Some("Stewed chicken with rice")
        );
        assert_eq!(menu.item_position("B"), Some(2));
        assert!(menu.extra("JUICE").is_some());
        assert!(menu.item("JUICE").is_none());
    }

    #[test]
    fn load_reads_toml_menu() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[items]]
id = "A"
name = "Lunch A"
icon = "🍱"

[[extras]]
id = "TEA"
name = "Iced tea"
icon = "🧊"
"#
        )
        .unwrap();

        let menu = Catalog::load(file.path()).unwrap();
        assert_eq!(menu.items[0].name, "Lunch A");
        assert_eq!(menu.items[0].todays_detail, None);
        assert_eq!(menu.items[0].description, "");
        assert_eq!(menu.extras[0].id, "TEA");
    }

    #[test]
    fn missing_file_is_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("menu.toml")).unwrap_err();
        assert!(matches!(err, CoreError::MissingCatalog { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[items]]\nid = 5\n").unwrap();
        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::Catalog(CatalogError::Parse { .. })));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut menu = Catalog::builtin();
        menu.items.push(menu.items[0].clone());
        assert!(matches!(menu.validate(), Err(CatalogError::DuplicateId(id)) if id == "SOUP_ONLY"));

        let mut menu = Catalog::builtin();
        menu.extras[0].id = " ".into();
        assert!(matches!(menu.validate(), Err(CatalogError::EmptyId)));
    }

    #[test]
    fn load_or_builtin_without_path() {
        assert_eq!(Catalog::load_or_builtin(None).unwrap(), Catalog::builtin());
    }
}
