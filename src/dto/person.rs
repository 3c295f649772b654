//! Response projections for person records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::{cpf, person::Person};

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Wire shape of a person record. The CPF is rendered in display form and
/// the age is computed from the birth date at projection time.
pub struct PersonResponse {
    pub id: i32,
    pub name: String,
    pub sex: Option<String>,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub birthplace: Option<String>,
    pub nationality: Option<String>,
    pub cpf: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            age: person.age(),
            cpf: cpf::format(&person.cpf),
            name: person.name,
            sex: person.sex,
            email: person.email,
            birth_date: person.birth_date,
            birthplace: person.birthplace,
            nationality: person.nationality,
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Body of the CPF existence check endpoint.
pub struct CpfExistsResponse {
    pub exists: bool,
}
