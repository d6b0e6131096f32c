//! Builds parameterized SELECT lists with optional filters and a skip/take window.

use crate::error::AppError;
use sqlx::{Postgres, QueryBuilder};

/// Rows returned when `take` is omitted.
pub const DEFAULT_TAKE: i64 = 5;
/// Upper bound applied to `take`.
pub const MAX_TAKE: i64 = 1000;

/// Skip/take window over an id-ordered collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub skip: i64,
    pub take: i64,
}

impl Default for Window {
    fn default() -> Self {
        Window {
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

impl Window {
    /// Negative values are rejected; `take` is capped at [`MAX_TAKE`].
    pub fn new(skip: Option<i64>, take: Option<i64>) -> Result<Self, AppError> {
        let skip = skip.unwrap_or(0);
        let take = take.unwrap_or(DEFAULT_TAKE);
        if skip < 0 {
            return Err(AppError::BadRequest("skip must be >= 0".into()));
        }
        if take < 0 {
            return Err(AppError::BadRequest("take must be >= 0".into()));
        }
        Ok(Window {
            skip,
            take: take.min(MAX_TAKE),
        })
    }
}

/// SELECT with conditions joined by AND. Every value goes through `push_bind`.
pub struct SelectBuilder<'args> {
    qb: QueryBuilder<'args, Postgres>,
    has_where: bool,
}

impl<'args> SelectBuilder<'args> {
    /// `select` is the `SELECT ... FROM ...` head, built from code-owned identifiers.
    pub fn new(select: impl Into<String>) -> Self {
        SelectBuilder {
            qb: QueryBuilder::new(select),
            has_where: false,
        }
    }

    /// `SELECT {columns} FROM ({inner} ORDER BY {order_by} LIMIT $1 OFFSET $2) {alias}`.
    /// Conditions added afterwards filter the rows inside the window, not the whole table.
    pub fn over_window(columns: &str, inner: &str, order_by: &str, alias: &str, window: Window) -> Self {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM ({} ORDER BY {} LIMIT ", columns, inner, order_by));
        qb.push_bind(window.take)
            .push(" OFFSET ")
            .push_bind(window.skip)
            .push(") ")
            .push(alias);
        SelectBuilder { qb, has_where: false }
    }

    /// Starts a new condition (` WHERE ` or ` AND `); the caller pushes the predicate.
    pub fn and_where(&mut self) -> &mut QueryBuilder<'args, Postgres> {
        self.qb.push(if self.has_where { " AND " } else { " WHERE " });
        self.has_where = true;
        &mut self.qb
    }

    /// Appends `ORDER BY {order_by} LIMIT $n OFFSET $m`.
    pub fn window(mut self, order_by: &str, window: Window) -> QueryBuilder<'args, Postgres> {
        self.qb
            .push(" ORDER BY ")
            .push(order_by)
            .push(" LIMIT ")
            .push_bind(window.take)
            .push(" OFFSET ")
            .push_bind(window.skip);
        self.qb
    }

    /// Appends `ORDER BY {order_by}` without a window.
    pub fn order_by(mut self, order_by: &str) -> QueryBuilder<'args, Postgres> {
        self.qb.push(" ORDER BY ").push(order_by);
        self.qb
    }

    /// Finishes without windowing (single-row lookups).
    pub fn finish(self) -> QueryBuilder<'args, Postgres> {
        self.qb
    }
}
