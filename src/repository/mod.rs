use crate::{
    domain::{
        person::{Person, NewPerson, UpdatePerson},
        user::{User, NewUser},
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(test)]
pub mod mock;
pub mod person;
pub mod user;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Default)]
/// Listing parameters for active person records.
///
/// The search string is matched as a substring of the name and email
/// (case-insensitively) and of the canonical CPF (verbatim); a record
/// matches when any of the three hits. Results are always ordered by
/// ascending identifier so pages stay consistent across calls.
pub struct PersonListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl PersonListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait PersonReader {
    /// Fetches an active person by id.
    fn get_person_by_id(&self, id: i32) -> RepositoryResult<Option<Person>>;
    /// Fetches an active person by canonical CPF.
    fn get_person_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Person>>;
    /// Returns the total match count and the requested page of active persons.
    fn list_persons(&self, query: PersonListQuery) -> RepositoryResult<(usize, Vec<Person>)>;
    /// True when an active person other than `exclude_id` holds this CPF.
    fn person_exists_by_cpf(
        &self,
        cpf: &str,
        exclude_id: Option<i32>,
    ) -> RepositoryResult<bool>;
}

pub trait PersonWriter {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person>;
    fn update_person(&self, person_id: i32, updates: &UpdatePerson) -> RepositoryResult<Person>;
    /// Soft delete; returns `NotFound` when no active record has this id.
    fn delete_person(&self, person_id: i32) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    /// Looks an active user up by username or email, whichever matches.
    fn get_user_by_login(&self, login: &str) -> RepositoryResult<Option<User>>;
    fn get_user_by_recovery_token(&self, token: &str) -> RepositoryResult<Option<User>>;
    fn user_exists(&self, username: &str, email: &str) -> RepositoryResult<bool>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn set_last_login(&self, user_id: i32) -> RepositoryResult<()>;
    fn set_recovery_token(
        &self,
        user_id: i32,
        token: &str,
        expires: chrono::NaiveDateTime,
    ) -> RepositoryResult<()>;
    /// Replaces the password hash and clears any pending recovery token.
    fn set_password_hash(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
}
