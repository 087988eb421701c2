//! Structural design patterns in idiomatic Rust.
//!
//! - Composite: [`domain::OrgChart`], an arena tree of employees and
//!   departments aggregating descriptions and revenue.
//! - Proxy: [`application::services::CachingDownloader`], a memoizing
//!   stand-in for an expensive [`infrastructure::traits::Downloader`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
