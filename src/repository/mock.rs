//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::person::{Person, NewPerson, UpdatePerson};
use crate::domain::user::{User, NewUser};
use crate::repository::errors::RepositoryResult;
use crate::repository::{PersonListQuery, PersonReader, PersonWriter, UserReader, UserWriter};

mock! {
    pub Repository {}

    impl PersonReader for Repository {
        fn get_person_by_id(&self, id: i32) -> RepositoryResult<Option<Person>>;
        fn get_person_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Person>>;
        fn list_persons(&self, query: PersonListQuery) -> RepositoryResult<(usize, Vec<Person>)>;
        fn person_exists_by_cpf(
            &self,
            cpf: &str,
            exclude_id: Option<i32>,
        ) -> RepositoryResult<bool>;
    }

    impl PersonWriter for Repository {
        fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person>;
        fn update_person(&self, person_id: i32, updates: &UpdatePerson) -> RepositoryResult<Person>;
        fn delete_person(&self, person_id: i32) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_login(&self, login: &str) -> RepositoryResult<Option<User>>;
        fn get_user_by_recovery_token(&self, token: &str) -> RepositoryResult<Option<User>>;
        fn user_exists(&self, username: &str, email: &str) -> RepositoryResult<bool>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn set_last_login(&self, user_id: i32) -> RepositoryResult<()>;
        fn set_recovery_token(
            &self,
            user_id: i32,
            token: &str,
            expires: chrono::NaiveDateTime,
        ) -> RepositoryResult<()>;
        fn set_password_hash(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()>;
    }
}
