use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};

use crate::person::models::{NewPerson, Pagination, Person, PersonFilter};
use crate::person::repositories::PersonStore;
use persona_common::error::{PersonaError, PersonaResult};

const PERSON_COLUMNS: &str = "id, name, surname, patronymic, age, gender, nationality, version, created_at, updated_at";

#[derive(Clone)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: PgRow) -> Person {
        Person {
            id: row.get("id"),
            name: row.get("name"),
            surname: row.get("surname"),
            patronymic: row.get("patronymic"),
            age: row.get("age"),
            gender: row.get("gender"),
            nationality: row.get("nationality"),
            version: row.get("version"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &PersonFilter) {
        let mut separator = " where ";
        if let Some(name) = filter.name() {
            qb.push(separator)
                .push("name ilike ")
                .push_bind(like_pattern(name));
            separator = " and ";
        }
        if let Some(surname) = filter.surname() {
            qb.push(separator)
                .push("surname ilike ")
                .push_bind(like_pattern(surname));
        }
    }
}

fn db_error(e: sqlx::Error) -> PersonaError {
    PersonaError::Persistence(e.to_string())
}

/// `%fragment%` with LIKE metacharacters in the fragment matched literally.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn exists(
        &self,
        name: &str,
        surname: &str,
        patronymic: Option<&str>,
    ) -> PersonaResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "select exists(
                 select 1 from person
                 where name = $1 and surname = $2 and coalesce(patronymic, '') = coalesce($3::text, '')
             )",
        )
        .bind(name)
        .bind(surname)
        .bind(patronymic)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn insert(&self, person: NewPerson) -> PersonaResult<Person> {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            "insert into person (name, surname, patronymic, age, gender, nationality, version, created_at, updated_at)
             values ($1, $2, $3, $4, $5, $6, 1, $7, $7)
             returning {PERSON_COLUMNS}"
        ))
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.patronymic)
        .bind(person.age)
        .bind(&person.gender)
        .bind(&person.nationality)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => PersonaError::Conflict(
                format!("person already exists: {} {}", person.name, person.surname),
            ),
            other => db_error(other),
        })?;

        Ok(Self::map_row(row))
    }

    async fn find_by_id(&self, id: i64) -> PersonaResult<Person> {
        let row = sqlx::query(&format!("select {PERSON_COLUMNS} from person where id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(Self::map_row)
            .ok_or_else(|| PersonaError::NotFound(format!("person not found: {id}")))
    }

    async fn find_all(
        &self,
        filter: &PersonFilter,
        pagination: Pagination,
    ) -> PersonaResult<Vec<Person>> {
        let mut qb = QueryBuilder::new(format!("select {PERSON_COLUMNS} from person"));
        Self::push_filter(&mut qb, filter);

        qb.push(" order by id asc");
        qb.push(" limit ").push_bind(pagination.limit);
        qb.push(" offset ").push_bind(pagination.offset());

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Self::map_row).collect())
    }

    async fn count(&self, filter: &PersonFilter) -> PersonaResult<i64> {
        let mut qb = QueryBuilder::new("select count(*) from person");
        Self::push_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn update(&self, person: Person) -> PersonaResult<Person> {
        let row = sqlx::query(&format!(
            "update person
             set name = $1, surname = $2, patronymic = $3, age = $4, gender = $5, nationality = $6,
                 version = version + 1, updated_at = $7
             where id = $8 and version = $9
             returning {PERSON_COLUMNS}"
        ))
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.patronymic)
        .bind(person.age)
        .bind(&person.gender)
        .bind(&person.nationality)
        .bind(Utc::now())
        .bind(person.id)
        .bind(person.version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => PersonaError::Conflict(
                format!("another person already uses {} {}", person.name, person.surname),
            ),
            other => db_error(other),
        })?;

        if let Some(row) = row {
            return Ok(Self::map_row(row));
        }

        // Zero rows: either the id is gone or the version moved on.
        let still_there =
            sqlx::query_scalar::<_, bool>("select exists(select 1 from person where id = $1)")
                .bind(person.id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error)?;

        if still_there {
            Err(PersonaError::Conflict(format!(
                "person {} was modified concurrently (expected version {}), retry the update",
                person.id, person.version
            )))
        } else {
            Err(PersonaError::NotFound(format!(
                "person not found: {}",
                person.id
            )))
        }
    }

    async fn delete(&self, id: i64) -> PersonaResult<()> {
        let result = sqlx::query("delete from person where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(PersonaError::NotFound(format!("person not found: {id}")));
        }

        Ok(())
    }
}
