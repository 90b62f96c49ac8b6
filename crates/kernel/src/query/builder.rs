//! Article query rendering using SeaQuery.
//!
//! Every article read goes through the same left-join aggregate so
//! `comment_count` is computed identically for single rows and listings.
//! Identifiers come from [`SortColumn`]; values are emitted as `$n`
//! placeholders and returned separately for binding.

use sea_query::{
    Alias, Expr, Iden, Order, PostgresQueryBuilder, Query, SelectStatement, Value, Values,
};

use super::columns::{SortColumn, SortDirection};
use super::validator::ArticleListSpec;
use crate::error::{BoardError, BoardResult};

#[derive(Iden)]
enum Articles {
    Table,
    ArticleId,
    Title,
    Topic,
    Author,
    Body,
    CreatedAt,
    Votes,
}

#[derive(Iden)]
enum Comments {
    Table,
    ArticleId,
}

const COMMENT_COUNT: &str = "comment_count";

/// SQL text with its positional parameters.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<BindParam>,
}

/// A parameter value in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindParam {
    Text(String),
    Int(i64),
}

impl BuiltQuery {
    fn from_statement(statement: &SelectStatement) -> BoardResult<Self> {
        let (sql, values) = statement.build(PostgresQueryBuilder);
        Ok(Self {
            sql,
            params: bind_params(values)?,
        })
    }
}

/// Convert rendered values to bind parameters, in placeholder order.
///
/// Fails on the first value with no [`BindParam`] counterpart; skipping it
/// would shift every later placeholder onto the wrong value.
fn bind_params(values: Values) -> BoardResult<Vec<BindParam>> {
    values.0.into_iter().map(BindParam::try_from).collect()
}

impl TryFrom<Value> for BindParam {
    type Error = BoardError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(Some(s)) => Ok(BindParam::Text(*s)),
            Value::Int(Some(i)) => Ok(BindParam::Int(i64::from(i))),
            Value::BigInt(Some(i)) => Ok(BindParam::Int(i)),
            other => {
                tracing::error!(value = ?other, "unsupported bind value in article query");
                Err(BoardError::Store(sqlx::Error::Encode(
                    format!("unsupported bind value: {other:?}").into(),
                )))
            }
        }
    }
}

/// `SELECT articles.*, comment_count FROM articles LEFT JOIN comments ... GROUP BY article_id`
fn article_with_count() -> SelectStatement {
    let mut query = Query::select();
    query
        .columns([
            (Articles::Table, Articles::ArticleId),
            (Articles::Table, Articles::Title),
            (Articles::Table, Articles::Topic),
            (Articles::Table, Articles::Author),
            (Articles::Table, Articles::Body),
            (Articles::Table, Articles::CreatedAt),
            (Articles::Table, Articles::Votes),
        ])
        .expr_as(
            Expr::cust(r#"CAST(COUNT("comments"."comment_id") AS INT)"#),
            Alias::new(COMMENT_COUNT),
        )
        .from(Articles::Table)
        .left_join(
            Comments::Table,
            Expr::col((Comments::Table, Comments::ArticleId))
                .equals((Articles::Table, Articles::ArticleId)),
        )
        .group_by_col((Articles::Table, Articles::ArticleId));
    query
}

/// Single article with its comment count.
pub fn article_by_id(article_id: i32) -> BoardResult<BuiltQuery> {
    let mut query = article_with_count();
    query.and_where(Expr::col((Articles::Table, Articles::ArticleId)).eq(article_id));
    BuiltQuery::from_statement(&query)
}

/// Article listing for a validated spec.
///
/// `article_id` ascending is appended as a secondary key so equal sort
/// values come back in a stable order.
pub fn article_list(spec: &ArticleListSpec) -> BoardResult<BuiltQuery> {
    let mut query = article_with_count();

    if let Some(topic) = spec.topic() {
        query.and_where(Expr::col((Articles::Table, Articles::Topic)).eq(topic));
    }

    let order = match spec.direction() {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    match spec.column() {
        SortColumn::CommentCount => {
            query.order_by(Alias::new(COMMENT_COUNT), order);
        }
        SortColumn::ArticleId => {
            query.order_by((Articles::Table, Articles::ArticleId), order);
        }
        SortColumn::Title => {
            query.order_by((Articles::Table, Articles::Title), order);
        }
        SortColumn::Topic => {
            query.order_by((Articles::Table, Articles::Topic), order);
        }
        SortColumn::Author => {
            query.order_by((Articles::Table, Articles::Author), order);
        }
        SortColumn::Body => {
            query.order_by((Articles::Table, Articles::Body), order);
        }
        SortColumn::CreatedAt => {
            query.order_by((Articles::Table, Articles::CreatedAt), order);
        }
        SortColumn::Votes => {
            query.order_by((Articles::Table, Articles::Votes), order);
        }
    }

    if spec.column() != SortColumn::ArticleId {
        query.order_by((Articles::Table, Articles::ArticleId), Order::Asc);
    }

    BuiltQuery::from_statement(&query)
}
