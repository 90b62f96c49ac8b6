//! Database models.

pub mod article;
pub mod comment;
pub mod topic;
pub mod user;

pub use article::{Article, ArticleWithCount, parse_vote_patch};
pub use comment::{Comment, NewComment};
pub use topic::Topic;
pub use user::User;

use crate::error::{BoardError, BoardResult};

/// Parse a path identifier (`article_id`, `comment_id`).
pub fn parse_id(raw: &str) -> BoardResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| {
        BoardError::MalformedIdentifier(format!("`{raw}` is not a valid identifier"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_integer_ids() {
        assert_eq!(parse_id("1").ok(), Some(1));
        assert_eq!(parse_id(" 42 ").ok(), Some(42));
    }

    #[test]
    fn rejects_non_integer_ids() {
        for raw in ["abc", "1.5", "", "99999999999", "1; DROP TABLE articles"] {
            assert_eq!(
                parse_id(raw).err().map(|e| e.kind()),
                Some(ErrorKind::MalformedIdentifier),
                "{raw}"
            );
        }
    }
}
