use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::person::{
    Person as DomainPerson, NewPerson as DomainNewPerson, UpdatePerson as DomainUpdatePerson,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::persons)]
/// Diesel model for [`crate::domain::person::Person`].
pub struct Person {
    pub id: i32,
    pub name: String,
    pub sex: Option<String>,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub birthplace: Option<String>,
    pub nationality: Option<String>,
    pub cpf: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::persons)]
/// Insertable form of [`Person`].
pub struct NewPerson<'a> {
    pub name: &'a str,
    pub sex: Option<&'a str>,
    pub email: Option<&'a str>,
    pub birth_date: NaiveDate,
    pub birthplace: Option<&'a str>,
    pub nationality: Option<&'a str>,
    pub cpf: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::persons)]
/// Data used when updating a [`Person`] record; `None` fields are skipped.
pub struct UpdatePerson<'a> {
    pub name: Option<&'a str>,
    pub sex: Option<&'a str>,
    pub email: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub birthplace: Option<&'a str>,
    pub nationality: Option<&'a str>,
    pub cpf: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Person> for DomainPerson {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            sex: person.sex,
            email: person.email,
            birth_date: person.birth_date,
            birthplace: person.birthplace,
            nationality: person.nationality,
            cpf: person.cpf,
            created_at: person.created_at,
            updated_at: person.updated_at,
            active: person.active,
        }
    }
}

impl<'a> From<&'a DomainNewPerson> for NewPerson<'a> {
    fn from(person: &'a DomainNewPerson) -> Self {
        Self {
            name: person.name.as_str(),
            sex: person.sex.as_deref(),
            email: person.email.as_deref(),
            birth_date: person.birth_date,
            birthplace: person.birthplace.as_deref(),
            nationality: person.nationality.as_deref(),
            cpf: person.cpf.as_str(),
        }
    }
}

impl<'a> UpdatePerson<'a> {
    /// Builds a changeset from the domain update, stamping `updated_at`.
    pub fn from_domain(updates: &'a DomainUpdatePerson, updated_at: NaiveDateTime) -> Self {
        Self {
            name: updates.name.as_deref(),
            sex: updates.sex.as_deref(),
            email: updates.email.as_deref(),
            birth_date: updates.birth_date,
            birthplace: updates.birthplace.as_deref(),
            nationality: updates.nationality.as_deref(),
            cpf: updates.cpf.as_deref(),
            updated_at,
        }
    }
}
