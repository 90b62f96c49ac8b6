//! Article query shaping.
//!
//! This module provides:
//! - SortColumn / SortDirection: the sort allow-list
//! - ArticleListSpec: validated filter/sort request
//! - builder: SeaQuery-based SQL generation with bound parameters

pub mod builder;
pub mod columns;
pub mod validator;

pub use builder::{BindParam, BuiltQuery};
pub use columns::{SortColumn, SortDirection, is_sortable};
pub use validator::{ArticleListParams, ArticleListSpec};
