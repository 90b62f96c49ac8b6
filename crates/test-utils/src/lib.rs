//! Newsboard test utilities.
//!
//! A small deterministic data set (topics, users, articles, comments) and
//! a helper that resets the board tables to it. Integration tests reseed
//! before every case so they can rely on exact counts and orderings.

use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;

/// A topic row.
#[derive(Debug, Clone, Copy)]
pub struct SeedTopic {
    pub slug: &'static str,
    pub description: &'static str,
}

/// A user row.
#[derive(Debug, Clone, Copy)]
pub struct SeedUser {
    pub username: &'static str,
    pub name: &'static str,
    pub avatar_url: Option<&'static str>,
}

/// An article row. `article_id` is assigned by position, starting at 1.
#[derive(Debug, Clone, Copy)]
pub struct SeedArticle {
    pub title: &'static str,
    pub topic: &'static str,
    pub author: &'static str,
    pub body: &'static str,
    /// Seconds since the Unix epoch.
    pub created_at: i64,
    pub votes: i32,
}

/// A comment row. `comment_id` is assigned by position, starting at 1.
#[derive(Debug, Clone, Copy)]
pub struct SeedComment {
    pub article_id: i32,
    pub author: &'static str,
    pub body: &'static str,
    pub votes: i32,
    pub created_at: i64,
}

pub const TOPICS: &[SeedTopic] = &[
    SeedTopic {
        slug: "mitch",
        description: "The man, the Mitch, the legend",
    },
    SeedTopic {
        slug: "cats",
        description: "Not dogs",
    },
    SeedTopic {
        slug: "paper",
        description: "what books are made of",
    },
];

pub const USERS: &[SeedUser] = &[
    SeedUser {
        username: "butter_bridge",
        name: "jonny",
        avatar_url: Some("https://avatars.example.com/butter_bridge.png"),
    },
    SeedUser {
        username: "icellusedkars",
        name: "sam",
        avatar_url: Some("https://avatars.example.com/icellusedkars.png"),
    },
    SeedUser {
        username: "rogersop",
        name: "paul",
        avatar_url: None,
    },
    SeedUser {
        username: "lurker",
        name: "do_nothing",
        avatar_url: None,
    },
];

pub const ARTICLES: &[SeedArticle] = &[
    // 1
    SeedArticle {
        title: "Living in the shadow of a great man",
        topic: "mitch",
        author: "butter_bridge",
        body: "I find this existence challenging",
        created_at: 1_594_329_060,
        votes: 100,
    },
    // 2: no comments
    SeedArticle {
        title: "Sony Vaio; or, The Laptop",
        topic: "mitch",
        author: "icellusedkars",
        body: "Call me Mitchell.",
        created_at: 1_602_828_180,
        votes: 0,
    },
    // 3
    SeedArticle {
        title: "Eight pug gifs that remind me of mitch",
        topic: "mitch",
        author: "icellusedkars",
        body: "some gifs",
        created_at: 1_604_394_720,
        votes: 0,
    },
    // 4
    SeedArticle {
        title: "UNCOVERED: catspiracy to bring down democracy",
        topic: "cats",
        author: "rogersop",
        body: "Bastet walks amongst us, and the cats are taking arms!",
        created_at: 1_596_464_040,
        votes: 7,
    },
    // 5
    SeedArticle {
        title: "A",
        topic: "mitch",
        author: "icellusedkars",
        body: "Delicious tin of cat food",
        created_at: 1_604_728_980,
        votes: -3,
    },
    // 6
    SeedArticle {
        title: "Z",
        topic: "mitch",
        author: "icellusedkars",
        body: "I was hungry.",
        created_at: 1_578_406_080,
        votes: 12,
    },
];

pub const COMMENTS: &[SeedComment] = &[
    SeedComment {
        article_id: 1,
        author: "butter_bridge",
        body: "Oh, I've got compassion running out of my nose, pal!",
        votes: 16,
        created_at: 1_586_179_020,
    },
    SeedComment {
        article_id: 1,
        author: "butter_bridge",
        body: "The beautiful thing about treasure is that it exists.",
        votes: 14,
        created_at: 1_604_113_380,
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Replacing the quiet elegance of the dark suit and tie.",
        votes: -100,
        created_at: 1_583_025_180,
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "I hate streaming noses",
        votes: 0,
        created_at: 1_604_437_200,
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Fruit pastilles",
        votes: 0,
        created_at: 1_592_220_300,
    },
    SeedComment {
        article_id: 3,
        author: "icellusedkars",
        body: "Ambidextrous marsupial",
        votes: 0,
        created_at: 1_600_560_600,
    },
    SeedComment {
        article_id: 3,
        author: "rogersop",
        body: "git push origin master",
        votes: 0,
        created_at: 1_592_641_440,
    },
    SeedComment {
        article_id: 4,
        author: "butter_bridge",
        body: "This morning, I showered for nine minutes.",
        votes: 16,
        created_at: 1_595_294_400,
    },
    SeedComment {
        article_id: 5,
        author: "icellusedkars",
        body: "What do you see? I have no idea where this will lead us.",
        votes: 5,
        created_at: 1_591_438_200,
    },
    SeedComment {
        article_id: 6,
        author: "butter_bridge",
        body: "Massive intercranial brain haemorrhage",
        votes: 0,
        created_at: 1_585_474_020,
    },
    SeedComment {
        article_id: 6,
        author: "icellusedkars",
        body: "Lobster pot",
        votes: 0,
        created_at: 1_589_577_540,
    },
];

/// Article with no comments in the seed set.
pub const ARTICLE_WITHOUT_COMMENTS: i32 = 2;

/// User who has not written anything in the seed set.
pub const IDLE_USER: &str = "lurker";

/// Number of seeded comments for `article_id`.
pub fn comment_count(article_id: i32) -> usize {
    COMMENTS
        .iter()
        .filter(|comment| comment.article_id == article_id)
        .count()
}

/// Number of seeded articles under `topic`.
pub fn article_count(topic: &str) -> usize {
    ARTICLES
        .iter()
        .filter(|article| article.topic == topic)
        .count()
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Truncate the board tables and load the seed set.
///
/// Identity sequences restart, so article and comment IDs match their
/// position in [`ARTICLES`] and [`COMMENTS`].
pub async fn seed(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE comments, articles, users, topics RESTART IDENTITY CASCADE")
        .execute(&mut *tx)
        .await?;

    for topic in TOPICS {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(topic.slug)
            .bind(topic.description)
            .execute(&mut *tx)
            .await?;
    }

    for user in USERS {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(user.username)
            .bind(user.name)
            .bind(user.avatar_url)
            .execute(&mut *tx)
            .await?;
    }

    for article in ARTICLES {
        sqlx::query(
            "INSERT INTO articles (title, topic, author, body, created_at, votes) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(article.title)
        .bind(article.topic)
        .bind(article.author)
        .bind(article.body)
        .bind(timestamp(article.created_at))
        .bind(article.votes)
        .execute(&mut *tx)
        .await?;
    }

    for comment in COMMENTS {
        sqlx::query(
            "INSERT INTO comments (article_id, author, body, votes, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(comment.article_id)
        .bind(comment.author)
        .bind(comment.body)
        .bind(comment.votes)
        .bind(timestamp(comment.created_at))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_set_is_internally_consistent() {
        for article in ARTICLES {
            assert!(TOPICS.iter().any(|t| t.slug == article.topic));
            assert!(USERS.iter().any(|u| u.username == article.author));
        }
        for comment in COMMENTS {
            assert!(comment.article_id >= 1);
            assert!(comment.article_id as usize <= ARTICLES.len());
            assert!(USERS.iter().any(|u| u.username == comment.author));
        }
    }

    #[test]
    fn fixture_markers_hold() {
        assert_eq!(comment_count(ARTICLE_WITHOUT_COMMENTS), 0);
        assert_eq!(article_count("paper"), 0);
        assert!(!ARTICLES.iter().any(|a| a.author == IDLE_USER));
        assert!(!COMMENTS.iter().any(|c| c.author == IDLE_USER));
    }
}
