//! Arcade points calculator core.
//!
//! Scrapes a public learning profile, classifies its badges, scores the
//! current season and cross-references the active arcade game catalog.

pub mod badges;
pub mod cache;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod history;
pub mod matcher;
pub mod models;
pub mod monitoring;
pub mod output;
pub mod profile;
pub mod scoring;
pub mod service;

pub use error::{FetchError, ServiceError};
pub use models::{Badge, BadgeCategory, CatalogEntry, GameStatus, ResultData};
pub use service::ArcadeService;
