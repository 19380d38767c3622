use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A person that has been enriched but not yet stored; the store assigns
/// `id`, `version` and both timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
}

/// Case-insensitive substring filters, combined with AND.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersonFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
}

impl PersonFilter {
    /// Name fragment, if one was given and is not blank.
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn surname(&self) -> Option<&str> {
        non_blank(self.surname.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// `(page - 1) * limit`, never negative.
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .max(0)
    }
}

/// Empty and missing patronymics are the same thing; the store keeps `None`.
pub fn normalize_patronymic(patronymic: Option<String>) -> Option<String> {
    patronymic
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
