//! Client core for the FileFolio project portfolio: the session store, the
//! project catalog, form validation and the API client.
//!
//! Nothing here touches the DOM. The browser app plugs in a storage adapter
//! and drives the services from its views.

pub mod api;
pub mod catalog;
pub mod config;
mod error;
pub mod forms;
pub mod notice;
pub mod services;
pub mod session;

pub use api::{Backend, HttpBackend};
pub use catalog::{Catalog, DedupPolicy, ProjectStatus, ProjectSummary, Source, StaticBaseline};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ValidationErrors, ValidationFailure};
pub use notice::{Notice, NoticeLevel};
pub use session::{
    CommitOutcome, Credentials, MemoryStorage, Session, SessionStorage, SessionStore,
};
