//! Login, logout and current-user lookup

use crate::api::models::CurrentUser;
use crate::auth::{LoginRequest, LoginResponse, SessionStore, UserInfo};
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};

/// Log in and store the resulting session
pub async fn login(
    client: &ApiClient,
    session: &SessionStore,
    username: &str,
    password: &str,
) -> Result<UserInfo> {
    let request = ApiRequest::post("/auth/login").json(&LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })?;

    let response: LoginResponse = client.call(request).await?;
    let (token, info) = response.into_session();
    session.set_session(&token, &info)?;

    tracing::info!("Logged in as {} ({})", info.display_name(), info.role);
    Ok(info)
}

/// Forget the local session. The backend keeps no session state to revoke.
pub fn logout(session: &SessionStore) -> Result<()> {
    session.clear_session()?;
    tracing::info!("Logged out");
    Ok(())
}

pub async fn current_user(client: &ApiClient) -> Result<CurrentUser> {
    client.call(ApiRequest::get("/auth/userInfo")).await
}
