//! Newsboard kernel library.
//!
//! Exposes the record store, repositories and HTTP router so integration
//! tests can drive them directly. The server entry point is the
//! `newsboard` binary.

pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod routes;
pub mod state;
