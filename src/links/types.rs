use serde::{Deserialize, Serialize};

use super::favicon;
use super::onenote::{DeepLink, NotebookTarget};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkRecord {
    #[serde(default)]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub favicon_data: Option<String>,
    #[serde(default)]
    pub is_onenote: bool,
}

impl LinkRecord {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: new_id(),
            title: url.clone(),
            url,
            description: String::new(),
            favicon_data: None,
            is_onenote: false,
        }
    }

    // Returns None when the record cannot be stored at all (empty url).
    pub fn validated(mut self) -> Option<Self> {
        self.url = self.url.trim().to_string();
        if self.url.is_empty() {
            return None;
        }
        if self.id.trim().is_empty() {
            self.id = new_id();
        }
        if self.title.trim().is_empty() {
            self.title = self.url.clone();
        }
        if let Some(data) = self.favicon_data.as_deref() {
            if favicon::decode(data).is_none() {
                self.favicon_data = None;
            }
        }
        Some(self)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct LinkView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub is_onenote: bool,
    pub kind: Option<NotebookTarget>,
    pub icon: Option<String>,
}

impl From<&LinkRecord> for LinkView {
    fn from(record: &LinkRecord) -> Self {
        Self {
            id: record.id.clone(),
            url: record.url.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            is_onenote: record.is_onenote,
            kind: record
                .is_onenote
                .then(|| DeepLink::parse(&record.url).map(|link| link.target()))
                .flatten(),
            icon: record.favicon_data.as_deref().and_then(favicon::data_url),
        }
    }
}
