//! Filter/sort validation for article listings.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::columns::{SortColumn, SortDirection};
use crate::error::{BoardError, BoardResult};

/// Raw, untrusted listing parameters as they arrive in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
}

impl ArticleListParams {
    pub fn sorted_by(mut self, column: &str, order: &str) -> Self {
        self.sort_by = Some(column.to_string());
        self.order = Some(order.to_string());
        self
    }

    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }
}

/// A validated listing request.
///
/// Only [`ArticleListSpec::validate`] builds one from user input, so
/// holding a value means every part of it is on the allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListSpec {
    column: SortColumn,
    direction: SortDirection,
    topic: Option<String>,
}

impl ArticleListSpec {
    /// Validate `params` against the allow-list and `known_topics`.
    ///
    /// Checks run column, order, topic; the first failure is returned.
    pub fn validate(
        params: &ArticleListParams,
        known_topics: &BTreeSet<String>,
    ) -> BoardResult<Self> {
        let column = match params.sort_by.as_deref() {
            None => SortColumn::default(),
            Some(name) => SortColumn::parse(name)
                .ok_or_else(|| BoardError::InvalidSortColumn(name.to_string()))?,
        };

        let direction = match params.order.as_deref() {
            None => SortDirection::default(),
            Some(order) => SortDirection::parse(order)
                .ok_or_else(|| BoardError::InvalidSortOrder(order.to_string()))?,
        };

        let topic = match params.topic.as_deref() {
            None => None,
            Some(slug) if known_topics.contains(slug) => Some(slug.to_string()),
            Some(slug) => return Err(BoardError::UnknownTopic(slug.to_string())),
        };

        Ok(Self {
            column,
            direction,
            topic,
        })
    }

    pub fn column(&self) -> SortColumn {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }
}
