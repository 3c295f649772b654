use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::DbPool,
    domain::person::{Person, NewPerson, UpdatePerson},
    repository::{PersonListQuery, PersonReader, PersonWriter, errors::RepositoryResult},
};

/// Diesel implementation of [`PersonReader`] and [`PersonWriter`].
///
/// Every query is scoped to `active = true`: soft-deleted records are
/// invisible to lookups, listings and existence checks alike.
pub struct DieselPersonRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselPersonRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl PersonReader for DieselPersonRepository<'_> {
    fn get_person_by_id(&self, id: i32) -> RepositoryResult<Option<Person>> {
        use crate::models::person::Person as DbPerson;
        use crate::schema::persons;

        let mut conn = self.pool.get()?;
        let person = persons::table
            .find(id)
            .filter(persons::active.eq(true))
            .first::<DbPerson>(&mut conn)
            .optional()?;

        Ok(person.map(Into::into))
    }

    fn get_person_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Person>> {
        use crate::models::person::Person as DbPerson;
        use crate::schema::persons;

        let mut conn = self.pool.get()?;
        let person = persons::table
            .filter(persons::cpf.eq(cpf))
            .filter(persons::active.eq(true))
            .first::<DbPerson>(&mut conn)
            .optional()?;

        Ok(person.map(Into::into))
    }

    fn list_persons(&self, query: PersonListQuery) -> RepositoryResult<(usize, Vec<Person>)> {
        use crate::models::person::Person as DbPerson;
        use crate::schema::persons;

        let mut conn = self.pool.get()?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut items = persons::table
            .filter(persons::active.eq(true))
            .order(persons::id.asc())
            .into_boxed();

        if let Some(term) = search {
            // LIKE on SQLite folds ASCII case, which gives the documented
            // case-insensitive match on name/email; the CPF column holds
            // digits only, so the term is effectively matched verbatim there.
            let pattern = format!("%{term}%");
            items = items.filter(
                persons::name
                    .like(pattern.clone())
                    .or(persons::cpf.like(pattern.clone()))
                    .or(persons::email.like(pattern)),
            );
        }

        if let Some(pagination) = &query.pagination {
            let per_page = pagination.per_page as i64;
            let page = pagination.page.max(1) as i64;
            items = items.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items
            .load::<DbPerson>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Person>>();

        let total: i64 = match search {
            Some(term) => {
                let pattern = format!("%{term}%");
                persons::table
                    .filter(persons::active.eq(true))
                    .filter(
                        persons::name
                            .like(pattern.clone())
                            .or(persons::cpf.like(pattern.clone()))
                            .or(persons::email.like(pattern)),
                    )
                    .count()
                    .get_result(&mut conn)?
            }
            None => persons::table
                .filter(persons::active.eq(true))
                .count()
                .get_result(&mut conn)?,
        };

        Ok((total as usize, items))
    }

    fn person_exists_by_cpf(
        &self,
        cpf: &str,
        exclude_id: Option<i32>,
    ) -> RepositoryResult<bool> {
        use crate::schema::persons;

        let mut conn = self.pool.get()?;

        let total: i64 = match exclude_id {
            Some(id) => persons::table
                .filter(persons::cpf.eq(cpf))
                .filter(persons::active.eq(true))
                .filter(persons::id.ne(id))
                .count()
                .get_result(&mut conn)?,
            None => persons::table
                .filter(persons::cpf.eq(cpf))
                .filter(persons::active.eq(true))
                .count()
                .get_result(&mut conn)?,
        };

        Ok(total > 0)
    }
}

impl PersonWriter for DieselPersonRepository<'_> {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person> {
        use crate::models::person::{Person as DbPerson, NewPerson as DbNewPerson};
        use crate::schema::persons;

        let mut conn = self.pool.get()?;
        let insertable: DbNewPerson = new_person.into();
        let created = diesel::insert_into(persons::table)
            .values(&insertable)
            .get_result::<DbPerson>(&mut conn)?;

        Ok(created.into())
    }

    fn update_person(&self, person_id: i32, updates: &UpdatePerson) -> RepositoryResult<Person> {
        use crate::models::person::{Person as DbPerson, UpdatePerson as DbUpdatePerson};
        use crate::schema::persons;

        let mut conn = self.pool.get()?;
        let changes = DbUpdatePerson::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(
            persons::table
                .find(person_id)
                .filter(persons::active.eq(true)),
        )
        .set(&changes)
        .get_result::<DbPerson>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_person(&self, person_id: i32) -> RepositoryResult<()> {
        use crate::repository::errors::RepositoryError;
        use crate::schema::persons;

        let mut conn = self.pool.get()?;
        let affected = diesel::update(
            persons::table
                .find(person_id)
                .filter(persons::active.eq(true)),
        )
        .set((
            persons::active.eq(false),
            persons::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
