//! In-memory collaborators for exercising the service and router without
//! Postgres or the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use persona_common::error::{PersonaError, PersonaResult};
use persona_db::person::models::{NewPerson, Pagination, Person, PersonFilter};
use persona_db::person::repositories::PersonStore;
use persona_enrich::{Enricher, Enrichment};

pub fn sample_person(name: &str, surname: &str, age: i32) -> Person {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Person {
        id: 0,
        name: name.to_string(),
        surname: surname.to_string(),
        patronymic: None,
        age,
        gender: "male".to_string(),
        nationality: "RU".to_string(),
        version: 1,
        created_at: at,
        updated_at: at,
    }
}

#[derive(Default)]
struct Rows {
    next_id: i64,
    people: Vec<Person>,
}

#[derive(Default)]
pub struct InMemoryPersonStore {
    rows: Mutex<Rows>,
    inserts: AtomicUsize,
}

impl InMemoryPersonStore {
    /// Store `person` as-is apart from a freshly assigned id.
    pub fn seed(&self, mut person: Person) -> Person {
        let mut rows = self.rows.lock().unwrap();
        rows.next_id += 1;
        person.id = rows.next_id;
        rows.people.push(person.clone());
        person
    }

    pub fn rows(&self) -> Vec<Person> {
        self.rows.lock().unwrap().people.clone()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

fn same_key(p: &Person, name: &str, surname: &str, patronymic: Option<&str>) -> bool {
    p.name == name
        && p.surname == surname
        && p.patronymic.as_deref().unwrap_or("") == patronymic.unwrap_or("")
}

fn matches(p: &Person, filter: &PersonFilter) -> bool {
    let contains = |value: &str, needle: Option<&str>| {
        needle.map_or(true, |n| value.to_lowercase().contains(&n.to_lowercase()))
    };
    contains(&p.name, filter.name()) && contains(&p.surname, filter.surname())
}

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    async fn exists(
        &self,
        name: &str,
        surname: &str,
        patronymic: Option<&str>,
    ) -> PersonaResult<bool> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .people
            .iter()
            .any(|p| same_key(p, name, surname, patronymic)))
    }

    async fn insert(&self, person: NewPerson) -> PersonaResult<Person> {
        let mut rows = self.rows.lock().unwrap();
        if rows.people.iter().any(|p| {
            same_key(p, &person.name, &person.surname, person.patronymic.as_deref())
        }) {
            return Err(PersonaError::Conflict("person already exists".to_string()));
        }

        self.inserts.fetch_add(1, Ordering::SeqCst);
        rows.next_id += 1;
        let now = Utc::now();
        let stored = Person {
            id: rows.next_id,
            name: person.name,
            surname: person.surname,
            patronymic: person.patronymic,
            age: person.age,
            gender: person.gender,
            nationality: person.nationality,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        rows.people.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> PersonaResult<Person> {
        let rows = self.rows.lock().unwrap();
        rows.people
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PersonaError::NotFound(format!("person {id}")))
    }

    async fn find_all(
        &self,
        filter: &PersonFilter,
        pagination: Pagination,
    ) -> PersonaResult<Vec<Person>> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<Person> = rows
            .people
            .iter()
            .filter(|p| matches(p, filter))
            .cloned()
            .collect();
        found.sort_by_key(|p| p.id);
        Ok(found
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &PersonFilter) -> PersonaResult<i64> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.people.iter().filter(|p| matches(p, filter)).count() as i64)
    }

    async fn update(&self, person: Person) -> PersonaResult<Person> {
        let mut rows = self.rows.lock().unwrap();
        let Some(index) = rows.people.iter().position(|p| p.id == person.id) else {
            return Err(PersonaError::NotFound(format!("person {}", person.id)));
        };
        if rows.people[index].version != person.version {
            return Err(PersonaError::Conflict(format!(
                "person {} was modified concurrently",
                person.id
            )));
        }

        let current = &rows.people[index];
        let stored = Person {
            version: current.version + 1,
            created_at: current.created_at,
            updated_at: Utc::now(),
            ..person
        };
        rows.people[index] = stored.clone();
        Ok(stored)
    }

    async fn delete(&self, id: i64) -> PersonaResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.people.len();
        rows.people.retain(|p| p.id != id);
        if rows.people.len() == before {
            return Err(PersonaError::NotFound(format!("person {id}")));
        }
        Ok(())
    }
}

pub struct StubEnricher {
    outcome: Result<Enrichment, String>,
    names: Mutex<Vec<String>>,
}

impl StubEnricher {
    pub fn returning(age: i32, gender: &str, nationality: &str) -> Self {
        Self {
            outcome: Ok(Enrichment {
                age,
                gender: gender.to_string(),
                nationality: nationality.to_string(),
            }),
            names: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            names: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.names.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

#[async_trait]
impl Enricher for StubEnricher {
    async fn enrich(&self, name: &str) -> PersonaResult<Enrichment> {
        self.names.lock().unwrap().push(name.to_string());
        self.outcome.clone().map_err(PersonaError::Enrichment)
    }
}
