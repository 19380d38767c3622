use persona_db::person::models::{Pagination, PersonFilter};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePersonRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub patronymic: Option<String>,
}

/// Partial update. Absent, empty and zero values all mean "keep the stored
/// value", so a field cannot be cleared through this request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    /// Revision the caller last read; stale values are rejected.
    pub version: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPeopleQuery {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListPeopleQuery {
    pub fn into_parts(self) -> (PersonFilter, Pagination) {
        (
            PersonFilter {
                name: self.name,
                surname: self.surname,
            },
            Pagination::new(self.page, self.limit),
        )
    }
}
