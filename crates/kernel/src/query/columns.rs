//! Sortable column allow-list.

use std::fmt;

use serde::Serialize;

/// Column an article listing may be ordered by.
///
/// The enum is the allow-list: a name that does not parse into a variant
/// never reaches a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    ArticleId,
    Title,
    Topic,
    Author,
    Body,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortColumn {
    pub const ALL: [SortColumn; 8] = [
        SortColumn::ArticleId,
        SortColumn::Title,
        SortColumn::Topic,
        SortColumn::Author,
        SortColumn::Body,
        SortColumn::CreatedAt,
        SortColumn::Votes,
        SortColumn::CommentCount,
    ];

    /// Column name as it appears in the result set.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortColumn::ArticleId => "article_id",
            SortColumn::Title => "title",
            SortColumn::Topic => "topic",
            SortColumn::Author => "author",
            SortColumn::Body => "body",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
            SortColumn::CommentCount => "comment_count",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.as_str() == name)
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership test against the allow-list.
pub fn is_sortable(name: &str) -> bool {
    SortColumn::parse(name).is_some()
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Case-insensitive match on `asc` / `desc`.
    pub fn parse(order: &str) -> Option<Self> {
        if order.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if order.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}
