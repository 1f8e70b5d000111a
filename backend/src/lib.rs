//! Wellness Tracker Backend Library
//!
//! This library exposes the backend modules for use in tests and the binary.

pub mod ai;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod rate_limit;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
