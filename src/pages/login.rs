//! Login, registration and logout flows.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::error::ApiError;
use crate::forms::{LoginForm, RegisterForm};
use crate::net::api::ApiClient;
use crate::notify::Notice;
use crate::state::query_cache::BookQueries;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_SUCCESS: &str = "Registration successful!";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const LOGGED_OUT: &str = "Logged out.";

/// Validate, call `POST /api/users/login`, and store the returned token.
///
/// The previous token is kept if anything fails.
pub async fn login(client: &ApiClient, form: &LoginForm) -> Notice {
    match try_login(client, form).await {
        Ok(()) => Notice::success(LOGIN_SUCCESS),
        Err(error) => {
            tracing::warn!(%error, "login failed");
            Notice::from_error(&error, LOGIN_FAILED)
        }
    }
}

async fn try_login(client: &ApiClient, form: &LoginForm) -> Result<(), ApiError> {
    let credentials = form.validate()?;
    let token = client.login(&credentials).await?;
    client.tokens().set(token.access_token);
    Ok(())
}

/// Validate, call `POST /api/users/register`, and start a session with the
/// returned token.
pub async fn register(client: &ApiClient, form: &RegisterForm) -> Notice {
    match try_register(client, form).await {
        Ok(()) => Notice::success(REGISTER_SUCCESS),
        Err(error) => {
            tracing::warn!(%error, "registration failed");
            Notice::from_error(&error, REGISTER_FAILED)
        }
    }
}

async fn try_register(client: &ApiClient, form: &RegisterForm) -> Result<(), ApiError> {
    let account = form.validate()?;
    let token = client.register(&account).await?;
    client.tokens().set(token.access_token);
    Ok(())
}

/// End the session: drop the token and everything fetched with it.
pub fn logout(client: &ApiClient, queries: &BookQueries) -> Notice {
    client.tokens().clear();
    queries.clear();
    Notice::success(LOGGED_OUT)
}
