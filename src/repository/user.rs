use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::{
    db::DbPool,
    domain::user::{User, NewUser},
    repository::{UserReader, UserWriter, errors::RepositoryResult},
};

/// Diesel implementation of [`UserReader`] and [`UserWriter`].
pub struct DieselUserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselUserRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl UserReader for DieselUserRepository<'_> {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let user = users::table
            .find(id)
            .filter(users::active.eq(true))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_login(&self, login: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let user = users::table
            .filter(users::username.eq(login).or(users::email.eq(login)))
            .filter(users::active.eq(true))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_recovery_token(&self, token: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let user = users::table
            .filter(users::recovery_token.eq(token))
            .filter(users::recovery_token_expires.gt(Utc::now().naive_utc()))
            .filter(users::active.eq(true))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn user_exists(&self, username: &str, email: &str) -> RepositoryResult<bool> {
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let total: i64 = users::table
            .filter(users::username.eq(username).or(users::email.eq(email)))
            .count()
            .get_result(&mut conn)?;

        Ok(total > 0)
    }
}

impl UserWriter for DieselUserRepository<'_> {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::models::user::{User as DbUser, NewUser as DbNewUser};
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let insertable: DbNewUser = new_user.into();
        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn set_last_login(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        diesel::update(users::table.find(user_id))
            .set(users::last_login.eq(Utc::now().naive_utc()))
            .execute(&mut conn)?;

        Ok(())
    }

    fn set_recovery_token(
        &self,
        user_id: i32,
        token: &str,
        expires: NaiveDateTime,
    ) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        diesel::update(users::table.find(user_id))
            .set((
                users::recovery_token.eq(token),
                users::recovery_token_expires.eq(expires),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn set_password_hash(&self, user_id: i32, password_hash: &str) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        diesel::update(users::table.find(user_id))
            .set((
                users::password_hash.eq(password_hash),
                users::recovery_token.eq(None::<String>),
                users::recovery_token_expires.eq(None::<NaiveDateTime>),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
