//! Library layer for cfstats: the multi-handle `Member` aggregate, its
//! derived statistics, and a cached API client to feed it.
//!
//! Wraps the `codeforces_api` crate with an in-memory TTL cache, request
//! spacing, retries and input validation.

pub mod cache;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod member;
pub mod stats;
pub mod validation;

pub use codeforces_api;
pub use codeforces_api::types;

pub use client::CachedClient;
pub use config::ClientConfig;
pub use directory::{ContestDirectory, ContestList};
pub use error::CfStatsError;
pub use member::{HandleRating, Member, UserData};
pub use stats::{Bucket, ParticipatedContest};
