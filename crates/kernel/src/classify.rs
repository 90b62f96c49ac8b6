//! Storage failure classification.
//!
//! Maps the failure signal PostgreSQL reports (SQLSTATE code, constraint
//! name, detail text) onto [`BoardError`]. Only three codes are understood:
//!
//! - `23503` foreign_key_violation: which relation was missing decides
//!   between [`BoardError::ArticleDoesNotExist`] and
//!   [`BoardError::UserDoesNotExist`].
//! - `22P02` invalid_text_representation: [`BoardError::MalformedIdentifier`].
//! - `23502` not_null_violation: [`BoardError::MalformedComment`].
//!
//! Everything else is left unclassified and propagates as
//! [`BoardError::Store`] with the original `sqlx::Error` attached.

use sqlx::postgres::PgDatabaseError;
use tracing::{debug, warn};

use crate::error::BoardError;

pub const FOREIGN_KEY_VIOLATION: &str = "23503";
pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
pub const NOT_NULL_VIOLATION: &str = "23502";

/// Constraint guarding `comments.article_id`.
pub const COMMENT_ARTICLE_FK: &str = "comments_article_id_fkey";

/// Constraint guarding `comments.author`.
pub const COMMENT_AUTHOR_FK: &str = "comments_author_fkey";

/// The parts of a database error the classifier looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFailure {
    pub code: Option<String>,
    pub constraint: Option<String>,
    pub detail: Option<String>,
}

impl StoreFailure {
    /// Extract the failure signal from a sqlx error.
    ///
    /// Returns `None` for errors that did not come back from the database
    /// (pool timeouts, I/O, decode failures).
    pub fn from_sqlx(err: &sqlx::Error) -> Option<Self> {
        let db_err = err.as_database_error()?;
        let detail = db_err
            .try_downcast_ref::<PgDatabaseError>()
            .and_then(|pg| pg.detail())
            .map(str::to_string);

        Some(Self {
            code: db_err.code().map(|code| code.into_owned()),
            constraint: db_err.constraint().map(str::to_string),
            detail,
        })
    }
}

/// Relation a foreign-key violation pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRelation {
    Article,
    User,
}

impl MissingRelation {
    /// Resolve from the structured constraint name.
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            COMMENT_ARTICLE_FK => Some(Self::Article),
            COMMENT_AUTHOR_FK => Some(Self::User),
            _ => None,
        }
    }

    /// Resolve from the human-readable detail, e.g.
    /// `Key (author)=(ghost) is not present in table "users".`
    ///
    /// Brittle: depends on PostgreSQL's message wording. Only used when the
    /// constraint name is absent or unknown.
    pub fn from_detail(detail: &str) -> Option<Self> {
        if detail.contains("table \"articles\"") {
            Some(Self::Article)
        } else if detail.contains("table \"users\"") {
            Some(Self::User)
        } else {
            None
        }
    }

    fn into_error(self) -> BoardError {
        match self {
            Self::Article => BoardError::ArticleDoesNotExist,
            Self::User => BoardError::UserDoesNotExist,
        }
    }
}

/// Classify a failure signal, or `None` if it is not one we understand.
pub fn classify_failure(failure: &StoreFailure) -> Option<BoardError> {
    match failure.code.as_deref()? {
        FOREIGN_KEY_VIOLATION => failure
            .constraint
            .as_deref()
            .and_then(MissingRelation::from_constraint)
            .or_else(|| {
                failure
                    .detail
                    .as_deref()
                    .and_then(MissingRelation::from_detail)
            })
            .map(MissingRelation::into_error),
        INVALID_TEXT_REPRESENTATION => Some(BoardError::MalformedIdentifier(
            "identifier is not in the expected format".to_string(),
        )),
        NOT_NULL_VIOLATION => Some(BoardError::MalformedComment(
            "a required field is missing".to_string(),
        )),
        _ => None,
    }
}

/// Convert a sqlx error into a board error, classifying where possible.
pub fn classify(err: sqlx::Error) -> BoardError {
    let Some(failure) = StoreFailure::from_sqlx(&err) else {
        return BoardError::Store(err);
    };

    match classify_failure(&failure) {
        Some(classified) => {
            debug!(
                code = ?failure.code,
                constraint = ?failure.constraint,
                kind = ?classified.kind(),
                "classified store failure"
            );
            classified
        }
        None => {
            warn!(
                code = ?failure.code,
                constraint = ?failure.constraint,
                "store failure left unclassified"
            );
            BoardError::Store(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn failure(code: &str, constraint: Option<&str>, detail: Option<&str>) -> StoreFailure {
        StoreFailure {
            code: Some(code.to_string()),
            constraint: constraint.map(str::to_string),
            detail: detail.map(str::to_string),
        }
    }

    fn kind_of(failure: &StoreFailure) -> Option<ErrorKind> {
        classify_failure(failure).map(|e| e.kind())
    }

    #[test]
    fn article_constraint_maps_to_article_does_not_exist() {
        let f = failure(FOREIGN_KEY_VIOLATION, Some(COMMENT_ARTICLE_FK), None);
        assert_eq!(kind_of(&f), Some(ErrorKind::ArticleDoesNotExist));
    }

    #[test]
    fn author_constraint_maps_to_user_does_not_exist() {
        let f = failure(FOREIGN_KEY_VIOLATION, Some(COMMENT_AUTHOR_FK), None);
        assert_eq!(kind_of(&f), Some(ErrorKind::UserDoesNotExist));
    }

    #[test]
    fn constraint_name_wins_over_detail_text() {
        let f = failure(
            FOREIGN_KEY_VIOLATION,
            Some(COMMENT_AUTHOR_FK),
            Some("Key (article_id)=(9) is not present in table \"articles\"."),
        );
        assert_eq!(kind_of(&f), Some(ErrorKind::UserDoesNotExist));
    }

    #[test]
    fn detail_text_is_the_fallback() {
        let article = failure(
            FOREIGN_KEY_VIOLATION,
            None,
            Some("Key (article_id)=(999999) is not present in table \"articles\"."),
        );
        assert_eq!(kind_of(&article), Some(ErrorKind::ArticleDoesNotExist));

        let user = failure(
            FOREIGN_KEY_VIOLATION,
            Some("some_other_fkey"),
            Some("Key (author)=(ghost_user) is not present in table \"users\"."),
        );
        assert_eq!(kind_of(&user), Some(ErrorKind::UserDoesNotExist));
    }

    #[test]
    fn unknown_relation_is_left_unclassified() {
        let f = failure(
            FOREIGN_KEY_VIOLATION,
            Some("articles_topic_fkey"),
            Some("Key (topic)=(dogs) is not present in table \"topics\"."),
        );
        assert_eq!(kind_of(&f), None);
    }

    #[test]
    fn bad_request_codes() {
        assert_eq!(
            kind_of(&failure(INVALID_TEXT_REPRESENTATION, None, None)),
            Some(ErrorKind::MalformedIdentifier)
        );
        assert_eq!(
            kind_of(&failure(NOT_NULL_VIOLATION, None, None)),
            Some(ErrorKind::MalformedComment)
        );
    }

    #[test]
    fn other_codes_and_missing_code_are_unclassified() {
        assert_eq!(kind_of(&failure("23505", Some("pk"), None)), None);
        assert_eq!(kind_of(&StoreFailure::default()), None);
    }

    #[test]
    fn non_database_errors_propagate_unmodified() {
        let err = classify(sqlx::Error::RowNotFound);
        assert!(matches!(err, BoardError::Store(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn classified_errors_do_not_leak_storage_detail() {
        let f = failure(
            FOREIGN_KEY_VIOLATION,
            Some(COMMENT_ARTICLE_FK),
            Some("Key (article_id)=(999999) is not present in table \"articles\"."),
        );
        let message = classify_failure(&f).map(|e| e.to_string()).unwrap_or_default();
        assert!(!message.contains("999999"));
        assert!(!message.contains(COMMENT_ARTICLE_FK));
    }
}
