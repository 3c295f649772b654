use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cpf;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Person {
    pub id: i32,
    pub name: String,
    /// `M`, `F` or `O` when informed.
    pub sex: Option<String>,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub birthplace: Option<String>,
    pub nationality: Option<String>,
    /// Canonical digits-only CPF.
    pub cpf: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Soft-delete marker; inactive records are invisible to every lookup.
    pub active: bool,
}

impl Person {
    /// Completed years of age at `today`. A birthday falling on `today`
    /// counts as already turned.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age
    }

    pub fn age(&self) -> i32 {
        self.age_on(Utc::now().date_naive())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub sex: Option<String>,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub birthplace: Option<String>,
    pub nationality: Option<String>,
    pub cpf: String,
}

impl NewPerson {
    #[must_use]
    pub fn new(
        name: String,
        sex: Option<String>,
        email: Option<String>,
        birth_date: NaiveDate,
        birthplace: Option<String>,
        nationality: Option<String>,
        cpf: String,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            sex: sex.map(|s| s.trim().to_uppercase()).filter(|s| !s.is_empty()),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            birth_date,
            birthplace: birthplace
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            nationality: nationality
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            cpf: cpf::normalize(&cpf),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Partial update: `None` fields keep their stored value.
pub struct UpdatePerson {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub birthplace: Option<String>,
    pub nationality: Option<String>,
    /// A new CPF is re-validated and re-checked for uniqueness before it is
    /// applied.
    pub cpf: Option<String>,
}

impl UpdatePerson {
    #[must_use]
    pub fn new(
        name: Option<String>,
        sex: Option<String>,
        email: Option<String>,
        birth_date: Option<NaiveDate>,
        birthplace: Option<String>,
        nationality: Option<String>,
        cpf: Option<String>,
    ) -> Self {
        Self {
            name: name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            sex: sex.map(|s| s.trim().to_uppercase()).filter(|s| !s.is_empty()),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            birth_date,
            birthplace: birthplace.map(|s| s.trim().to_string()),
            nationality: nationality.map(|s| s.trim().to_string()),
            cpf: cpf.map(|s| cpf::normalize(&s)).filter(|s| !s.is_empty()),
        }
    }
}
