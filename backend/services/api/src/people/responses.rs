use chrono::{DateTime, Utc};
use persona_db::person::models::Person;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            surname: person.surname,
            patronymic: person.patronymic,
            age: person.age,
            gender: person.gender,
            nationality: person.nationality,
            version: person.version,
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}
