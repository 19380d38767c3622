use std::sync::Arc;

use persona_common::error::{PersonaError, PersonaResult};
use persona_db::person::models::{normalize_patronymic, NewPerson, Pagination, Person, PersonFilter};
use persona_db::person::repositories::PersonStore;
use persona_enrich::Enricher;

use super::requests::{CreatePersonRequest, UpdatePersonRequest};

/// One page of a listing plus the number of rows matching the filter.
#[derive(Debug)]
pub struct PersonPage {
    pub people: Vec<Person>,
    pub total: i64,
}

/// Create/read/update/delete over enriched person records.
///
/// Holds no state of its own beyond its collaborators, so clones are cheap
/// and can be shared across request tasks.
#[derive(Clone)]
pub struct PersonService {
    store: Arc<dyn PersonStore>,
    enricher: Arc<dyn Enricher>,
    enrich_on_rename: bool,
}

impl PersonService {
    pub fn new(store: Arc<dyn PersonStore>, enricher: Arc<dyn Enricher>) -> Self {
        Self {
            store,
            enricher,
            enrich_on_rename: false,
        }
    }

    /// When set, an update that changes the name refreshes the derived
    /// attributes the request did not set explicitly.
    pub fn with_enrich_on_rename(mut self, enabled: bool) -> Self {
        self.enrich_on_rename = enabled;
        self
    }

    /// Reject duplicates, enrich, then insert. Nothing is written unless
    /// enrichment succeeded.
    #[tracing::instrument(skip(self, req), fields(name = %req.name, surname = %req.surname))]
    pub async fn create(&self, req: CreatePersonRequest) -> PersonaResult<Person> {
        let name = required("name", &req.name)?;
        let surname = required("surname", &req.surname)?;
        let patronymic = normalize_patronymic(req.patronymic);

        if self
            .store
            .exists(&name, &surname, patronymic.as_deref())
            .await?
        {
            return Err(PersonaError::Conflict(format!(
                "person already exists: {name} {surname}"
            )));
        }

        let enrichment = self.enricher.enrich(&name).await?;

        let created = self
            .store
            .insert(NewPerson {
                name,
                surname,
                patronymic,
                age: enrichment.age,
                gender: enrichment.gender,
                nationality: enrichment.nationality,
            })
            .await?;

        tracing::info!(id = created.id, "person created");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> PersonaResult<Person> {
        self.store.find_by_id(id).await
    }

    /// Fetch, overlay the request, write back guarded by the version the
    /// record had when read (or the one the caller supplied).
    #[tracing::instrument(skip(self, req))]
    pub async fn update(&self, id: i64, req: UpdatePersonRequest) -> PersonaResult<Person> {
        if let Some(age) = req.age {
            if age < 0 {
                return Err(PersonaError::Validation(format!(
                    "age must not be negative: {age}"
                )));
            }
        }

        let existing = self.store.find_by_id(id).await?;
        let renamed = provided(&req.name).is_some_and(|name| name != existing.name);
        let mut merged = merge_update(existing, &req);

        if renamed && self.enrich_on_rename {
            let enrichment = self.enricher.enrich(&merged.name).await?;
            if positive(req.age).is_none() {
                merged.age = enrichment.age;
            }
            if provided(&req.gender).is_none() {
                merged.gender = enrichment.gender;
            }
            if provided(&req.nationality).is_none() {
                merged.nationality = enrichment.nationality;
            }
        }

        let updated = self.store.update(merged).await?;
        tracing::info!(id, version = updated.version, "person updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> PersonaResult<()> {
        self.store.delete(id).await?;
        tracing::info!(id, "person deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        filter: PersonFilter,
        pagination: Pagination,
    ) -> PersonaResult<PersonPage> {
        if pagination.limit <= 0 {
            return Err(PersonaError::Validation(format!(
                "limit must be greater than zero: {}",
                pagination.limit
            )));
        }

        let people = self.store.find_all(&filter, pagination).await?;
        let total = self.store.count(&filter).await?;
        Ok(PersonPage { people, total })
    }
}

/// Overlay the non-empty, non-zero fields of `req` onto `person`.
pub fn merge_update(mut person: Person, req: &UpdatePersonRequest) -> Person {
    if let Some(name) = provided(&req.name) {
        person.name = name;
    }
    if let Some(surname) = provided(&req.surname) {
        person.surname = surname;
    }
    if let Some(patronymic) = provided(&req.patronymic) {
        person.patronymic = Some(patronymic);
    }
    if let Some(age) = positive(req.age) {
        person.age = age;
    }
    if let Some(gender) = provided(&req.gender) {
        person.gender = gender;
    }
    if let Some(nationality) = provided(&req.nationality) {
        person.nationality = nationality;
    }
    if let Some(version) = req.version.filter(|v| *v > 0) {
        person.version = version;
    }
    person
}

fn required(field: &str, value: &str) -> PersonaResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PersonaError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

fn provided(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn positive(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}
