//! Bixso Orchestrator - Article recommendation chat service
//!
//! This crate answers chat messages with article recommendations. A fixed
//! policy looks up the user's profile, searches articles by the user's
//! interests and falls back to the most recent articles, then composes a
//! reply. Profiles and articles are read from Firestore.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
