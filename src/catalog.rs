use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::CatalogError;
use crate::record::Category;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "contDisplayTypeList", default)]
    cont_display_type_list: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(rename = "type", deserialize_with = "code_text")]
    code: String,
}

/// Category codes show up both as `"1000"` and `1000`.
fn code_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "category type must be a string or number, got {}",
            other
        ))),
    }
}

/// Categories in file order. A missing or malformed file yields an empty
/// list, which the caller treats as fatal.
pub fn load_categories(path: &Path) -> Vec<Category> {
    match read_categories(path) {
        Ok(categories) => categories,
        Err(e) => {
            warn!("Cannot load categories from {:?}: {}", path, e);
            Vec::new()
        }
    }
}

fn read_categories(path: &Path) -> Result<Vec<Category>, CatalogError> {
    let raw = fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&raw)?;

    // Repeated names keep their first position but take the last code.
    let mut categories: Vec<Category> = Vec::new();
    for entry in file.cont_display_type_list {
        match categories.iter_mut().find(|c| c.name == entry.name) {
            Some(existing) => existing.code = entry.code,
            None => categories.push(Category {
                name: entry.name,
                code: entry.code,
            }),
        }
    }
    Ok(categories)
}
