use serde::{Deserialize, Serialize};

/// One catalog entry. Field order is the CSV column order on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "contDisplayName")]
    pub cont_display_name: String,
    pub year: String,
    #[serde(rename = "pID")]
    pub p_id: String,
    pub name: String,
    pub score: String,
    #[serde(rename = "contentStyle")]
    pub content_style: String,
}

impl Record {
    /// Dedup identity: `(year, pID)`, compared as plain strings.
    pub fn key(&self) -> (&str, &str) {
        (&self.year, &self.p_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub code: String,
}
