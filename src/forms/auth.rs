use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /auth/register`.
pub struct RegisterForm {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /auth/login`; `login` is a username or an email.
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub login: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /auth/recover-password`.
pub struct RecoverPasswordForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /auth/reset-password`.
pub struct ResetPasswordForm {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /auth/change-password`.
pub struct ChangePasswordForm {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}
