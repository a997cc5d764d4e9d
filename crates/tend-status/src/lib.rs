//! # tend-status
//!
//! Builds one [`StatusRecord`](tend_core::record::StatusRecord) per project
//! by merging repository metadata, CI status, the open backlog and
//! registry publication data.
//!
//! ```text
//! descriptor ─► select ─► FanOut::join ─► CommitSha ─► status lookup
//!                                              │
//!                      classify ◄──────────────┘
//!                          │
//!                 release / urls / coverage ─► resolve ─► StatusRecord
//! ```
//!
//! The lookups themselves are collaborators ([`RepoApi`](tend_core::api::RepoApi),
//! [`PackageApi`](tend_core::api::PackageApi)); this crate never performs I/O
//! on its own.

pub mod classify;
pub mod coverage;
pub mod error;
pub mod fanout;
pub mod pipeline;
pub mod projection;
pub mod release;
pub mod resolve;
pub mod selector;
pub mod urls;

pub use error::StatusError;
pub use pipeline::StatusBuilder;
pub use projection::{BacklogKind, BacklogProjection, SummaryProjection};
pub use urls::Links;
