use serde::Deserialize;
use tracing::info;

use super::normalize::normalize_static;
use super::types::ProjectSummary;
use crate::error::ClientError;

const BUNDLED_PROJECTS: &str = include_str!("../../data/projects.json");

/// One record of the bundled project list, in its on-disk field names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StaticProject {
    #[serde(default)]
    pub projectimage: Option<String>,
    #[serde(default)]
    pub projectname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub userimage: Option<String>,
}

/// Projects shipped with the client. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticBaseline {
    entries: Vec<ProjectSummary>,
}

impl StaticBaseline {
    /// The list compiled into the binary.
    pub fn bundled() -> Result<Self, ClientError> {
        let baseline = Self::from_json(BUNDLED_PROJECTS)?;
        info!("Loaded {} bundled projects", baseline.len());
        Ok(baseline)
    }

    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        let records: Vec<StaticProject> = serde_json::from_str(raw)
            .map_err(|e| ClientError::Decode(format!("Invalid bundled projects: {}", e)))?;
        Ok(Self {
            entries: records.into_iter().map(normalize_static).collect(),
        })
    }

    pub fn from_entries(entries: Vec<ProjectSummary>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ProjectSummary] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
