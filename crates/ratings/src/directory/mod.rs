//! Typed client for the sibling company and vacancy directory services.
//!
//! The directories expose list-all endpoints only, so lookups fetch the full
//! listing and search it linearly. A missing id is a [`DirectoryError::NotFound`];
//! a failed call is a transport or status error. The two outcomes are never
//! collapsed into one another.

use crate::config::DirectoryConfig;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Which sibling directory a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    Company,
    Vacancy,
}

impl DirectoryKind {
    pub const fn label(self) -> &'static str {
        match self {
            DirectoryKind::Company => "company",
            DirectoryKind::Vacancy => "vacancy",
        }
    }

    const fn path_segment(self) -> &'static str {
        match self {
            DirectoryKind::Company => "companies",
            DirectoryKind::Vacancy => "vacancies",
        }
    }
}

/// Minimal record the directories return for each entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("{} {id} not found in directory", kind.label())]
    NotFound { kind: DirectoryKind, id: i64 },
    #[error("directory request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("directory responded with status {status}")]
    Status { status: u16 },
}

impl DirectoryError {
    /// True only for a confirmed miss; transport and status failures are transient.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound { .. })
    }
}

/// Lookup contract against the external directories.
pub trait DirectoryClient: Send + Sync {
    fn find_company(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<DirectoryEntry, DirectoryError>> + Send;

    fn find_vacancy(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<DirectoryEntry, DirectoryError>> + Send;
}

pub(crate) fn resolve(
    listing: Vec<DirectoryEntry>,
    kind: DirectoryKind,
    id: i64,
) -> Result<DirectoryEntry, DirectoryError> {
    listing
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or(DirectoryError::NotFound { kind, id })
}

/// Directory client backed by the real HTTP listings.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    http: reqwest::Client,
    companies_base_url: String,
    vacancies_base_url: String,
}

impl HttpDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            companies_base_url: config.companies_base_url.clone(),
            vacancies_base_url: config.vacancies_base_url.clone(),
        }
    }

    async fn fetch_listing(
        &self,
        base_url: &str,
        kind: DirectoryKind,
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let url = format!(
            "{}/api/v1/{}",
            base_url.trim_end_matches('/'),
            kind.path_segment()
        );
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

impl DirectoryClient for HttpDirectoryClient {
    async fn find_company(&self, id: i64) -> Result<DirectoryEntry, DirectoryError> {
        let listing = self
            .fetch_listing(&self.companies_base_url, DirectoryKind::Company)
            .await?;
        resolve(listing, DirectoryKind::Company, id)
    }

    async fn find_vacancy(&self, id: i64) -> Result<DirectoryEntry, DirectoryError> {
        let listing = self
            .fetch_listing(&self.vacancies_base_url, DirectoryKind::Vacancy)
            .await?;
        resolve(listing, DirectoryKind::Vacancy, id)
    }
}
