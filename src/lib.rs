//! smash-walls library
//!
//! This crate provides the core functionality for the `smash-walls` binary.
//! Keep the crate root minimal — implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The workflow is a single straight line: locate the month's archive post,
//! then download its matching wallpapers.
//!
//! - [`locator`] - Scans the paginated tag archive for the requested month's post
//! - [`fetcher`] - Filters the post's download links and writes the images to disk
//! - [`cli`] - Command-line interface orchestrating the locate/fetch workflow
//! - [`models`] - Transient values: target period and calendar variant
//! - [`constants`] - Site URLs, selectors and filter patterns
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use smash_walls::errors::AppResult;
//! use smash_walls::models::{CalendarMode, TargetPeriod};
//! use smash_walls::{fetcher, locator};
//!
//! # async fn example() -> AppResult<()> {
//! let client = reqwest::Client::new();
//! let period = TargetPeriod::new(10, 2016)?;
//!
//! if let Some(archive_url) = locator::locate(&client, &period).await? {
//!     let dir = std::path::Path::new("wallpapers");
//!     fetcher::download_wallpapers(
//!         &client,
//!         &archive_url,
//!         dir,
//!         "1920x1080",
//!         CalendarMode::WithCalendar,
//!     )
//!     .await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod constants;
pub mod errors;
pub mod fetcher;
pub mod locator;
pub mod models;
