//! Merge the remote and bundled project lists into one searchable view.
//!
//! The pipeline is combine -> dedup -> filter -> cap. Order is the source
//! order with remote entries first; nothing is ever re-sorted.

use std::collections::HashSet;

use tracing::{info, warn};

use super::baseline::StaticBaseline;
use super::normalize::normalize_remote;
use super::types::ProjectSummary;
use crate::api::Backend;
use crate::config::CATALOG_CAP;

/// How entries that look alike across sources are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Keep everything. The two sources share no key, so same-named
    /// projects are distinct entries.
    #[default]
    KeepAll,
    /// Keep the first entry per case-insensitive name.
    FirstByName,
}

/// Fetch and normalize the live list. Any failure yields an empty list.
pub async fn load_remote<B: Backend>(backend: &B) -> Vec<ProjectSummary> {
    match backend.list_projects().await {
        Ok(projects) => {
            let summaries: Vec<ProjectSummary> = projects.into_iter().map(normalize_remote).collect();
            info!("Normalized {} remote projects", summaries.len());
            summaries
        }
        Err(e) => {
            warn!("Remote project list unavailable, showing bundled projects only: {}", e);
            Vec::new()
        }
    }
}

/// Remote entries, then static entries, each in source order.
pub fn combine(static_set: &[ProjectSummary], remote_set: &[ProjectSummary]) -> Vec<ProjectSummary> {
    remote_set.iter().chain(static_set.iter()).cloned().collect()
}

pub fn dedup(entries: Vec<ProjectSummary>, policy: DedupPolicy) -> Vec<ProjectSummary> {
    match policy {
        DedupPolicy::KeepAll => entries,
        DedupPolicy::FirstByName => {
            let mut seen = HashSet::new();
            entries
                .into_iter()
                .filter(|p| seen.insert(p.name.to_lowercase()))
                .collect()
        }
    }
}

/// Entries whose name, owner label or any tag contains `query`, ignoring case.
pub fn filter(entries: Vec<ProjectSummary>, query: &str) -> Vec<ProjectSummary> {
    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter(|p| p.matches_lowercase(&needle))
        .collect()
}

pub fn cap(mut entries: Vec<ProjectSummary>, n: usize) -> Vec<ProjectSummary> {
    entries.truncate(n);
    entries
}

/// Both sources plus the display rules applied to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    baseline: StaticBaseline,
    remote: Vec<ProjectSummary>,
    cap: usize,
    policy: DedupPolicy,
}

impl Catalog {
    pub fn new(baseline: StaticBaseline) -> Self {
        Self {
            baseline,
            remote: Vec::new(),
            cap: CATALOG_CAP,
            policy: DedupPolicy::KeepAll,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_policy(mut self, policy: DedupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the remote part with a fresh fetch result.
    pub fn set_remote(&mut self, remote: Vec<ProjectSummary>) {
        self.remote = remote;
    }

    pub fn remote(&self) -> &[ProjectSummary] {
        &self.remote
    }

    pub fn baseline(&self) -> &StaticBaseline {
        &self.baseline
    }

    pub fn cap_size(&self) -> usize {
        self.cap
    }

    pub fn combined(&self) -> Vec<ProjectSummary> {
        dedup(combine(self.baseline.entries(), &self.remote), self.policy)
    }

    /// What the browse view shows for `query`.
    pub fn view(&self, query: &str) -> Vec<ProjectSummary> {
        cap(filter(self.combined(), query), self.cap)
    }

    /// Detail lookup by exact name; a remote match wins over a static one.
    pub fn find_by_name(&self, name: &str) -> Option<ProjectSummary> {
        self.combined().into_iter().find(|p| p.name == name)
    }

    /// Remote projects created by `owner_id`, in source order.
    pub fn owned_by(&self, owner_id: &str) -> Vec<ProjectSummary> {
        self.remote
            .iter()
            .filter(|p| p.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect()
    }

    /// Drop a remote entry after it was deleted server-side.
    pub fn remove_remote(&mut self, id: &str) -> bool {
        let before = self.remote.len();
        self.remote.retain(|p| p.id.as_deref() != Some(id));
        self.remote.len() != before
    }
}
