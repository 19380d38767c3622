use async_trait::async_trait;

use crate::person::models::{NewPerson, Pagination, Person, PersonFilter};
use persona_common::error::PersonaResult;

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Exact match on the dedup key. A `None` patronymic matches rows stored
    /// with either NULL or an empty string.
    async fn exists(
        &self,
        name: &str,
        surname: &str,
        patronymic: Option<&str>,
    ) -> PersonaResult<bool>;

    async fn insert(&self, person: NewPerson) -> PersonaResult<Person>;

    /// `NotFound` when no row has this id.
    async fn find_by_id(&self, id: i64) -> PersonaResult<Person>;

    /// Ordered by id ascending.
    async fn find_all(
        &self,
        filter: &PersonFilter,
        pagination: Pagination,
    ) -> PersonaResult<Vec<Person>>;

    async fn count(&self, filter: &PersonFilter) -> PersonaResult<i64>;

    /// Overwrite every mutable column, provided the stored `version` still
    /// equals `person.version`. Returns the row with its bumped version.
    /// `NotFound` if the id is gone, `Conflict` if another writer got there first.
    async fn update(&self, person: Person) -> PersonaResult<Person>;

    async fn delete(&self, id: i64) -> PersonaResult<()>;
}
