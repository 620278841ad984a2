//! Search and page through arXiv paper listings.
//!
//! `scholarly` is a small library behind an interactive arXiv search view, providing:
//!
//! - Decoding of arXiv Atom responses into [`PaperSummary`](paper::PaperSummary) values
//! - An HTTP client for keyword searches and the most-recent submissions feed
//! - A paginated list that accumulates pages and knows when a feed is exhausted
//! - The [`SearchView`](view::SearchView) state machine that a front-end drives
//!
//! # Getting Started
//!
//! ```no_run
//! use scholarly::{client::ArxivClient, config::Config, query::SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let client = ArxivClient::new(&Config::default())?;
//!
//!   // First page of a keyword search
//!   let page = client.fetch(&SearchQuery::text("quantum error correction"), 0).await?;
//!   for paper in &page.entries {
//!     println!("{} ({})", paper.title, paper.link);
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`paper`]: The decoded paper summary type
//! - [`feed`]: Atom/XML decoding of API responses
//! - [`query`]: Search terms and the recent-submissions feed
//! - [`client`]: The arXiv HTTP client and the [`PaperSource`](client::PaperSource) seam
//! - [`pager`]: Accumulating, generation-checked paginated lists
//! - [`view`]: The search view driving two independent feeds
//! - [`config`]: On-disk configuration
//! - [`error`]: Error type for the crate

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};
use url::Url;
#[cfg(test)] use {tempfile::tempdir, tracing_test::traced_test};

pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod pager;
pub mod paper;
pub mod query;
pub mod view;

use crate::{
  client::*, config::*, error::*, feed::*, pager::*, paper::*, query::*,
};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use scholarly::{client::ArxivClient, config::Config, prelude::*};
///
/// async fn example() -> Result<(), ScholarlyError> {
///   let client = ArxivClient::new(&Config::default())?;
///   let papers = client.fetch_page(&SearchQuery::Recent, 0).await?;
///   println!("{} recent papers", papers.len());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    client::PaperSource, error::ScholarlyError, paper::PaperSummary, query::SearchQuery,
  };
}
