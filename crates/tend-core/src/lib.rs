//! # tend-core
//!
//! Core types, collaborator traits, and error types for Tend.
//!
//! This crate provides the foundational types shared across all Tend crates:
//! - Project descriptors and history snapshots read from the catalog
//! - Domain shapes of every remote lookup (commit, repository, CI status,
//!   backlog items, package manifests, packuments)
//! - The flat [`record::StatusRecord`] emitted for the dashboard
//! - The [`api::RepoApi`] and [`api::PackageApi`] collaborator traits
//! - The cross-cutting [`errors::SourceError`]
//! - Lenient [`de`] helpers for client crates mapping wire payloads

pub mod api;
pub mod de;
pub mod errors;
pub mod project;
pub mod record;
pub mod sources;
