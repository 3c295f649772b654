use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::person::{NewPerson, UpdatePerson};

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /persons`.
pub struct CreatePersonForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// `M`, `F` or `O`; checked by the service.
    pub sex: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    #[validate(length(max = 100))]
    pub birthplace: Option<String>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
    /// Accepted in canonical or display form.
    #[validate(length(min = 11, max = 14))]
    pub cpf: String,
}

impl From<CreatePersonForm> for NewPerson {
    fn from(form: CreatePersonForm) -> Self {
        NewPerson::new(
            form.name,
            form.sex,
            form.email,
            form.birth_date,
            form.birthplace,
            form.nationality,
            form.cpf,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Body of `PUT /persons/{id}`; absent fields keep their stored value.
pub struct UpdatePersonForm {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub sex: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 100))]
    pub birthplace: Option<String>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
    #[validate(length(min = 11, max = 14))]
    pub cpf: Option<String>,
}

impl From<UpdatePersonForm> for UpdatePerson {
    fn from(form: UpdatePersonForm) -> Self {
        UpdatePerson::new(
            form.name,
            form.sex,
            form.email,
            form.birth_date,
            form.birthplace,
            form.nationality,
            form.cpf,
        )
    }
}
