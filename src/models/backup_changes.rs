use serde::{Deserialize, Serialize};

/// What changed on the site between two daily backups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupChanges {
    #[serde(default)]
    pub deltas: BackupDeltas,
    #[serde(default)]
    pub meta_diff: Vec<MetaDiffEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDeltas {
    #[serde(default)]
    pub media_created: Vec<String>,
    #[serde(default)]
    pub media_deleted: Vec<String>,
    #[serde(default)]
    pub posts_created: Vec<String>,
    #[serde(default)]
    pub posts_deleted: Vec<String>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
}

/// Change in the count of one kind of content, e.g. `{ "name": "comments", "num": 4 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaDiffEntry {
    pub name: String,
    pub num: i64,
}

impl BackupChanges {
    pub fn is_empty(&self) -> bool {
        let d = &self.deltas;
        d.media_created.is_empty()
            && d.media_deleted.is_empty()
            && d.posts_created.is_empty()
            && d.posts_deleted.is_empty()
            && d.plugins.is_empty()
            && d.themes.is_empty()
            && self.meta_diff.iter().all(|entry| entry.num == 0)
    }
}
