//! Authentication endpoints.
//!
//! Placeholders only: they answer with fixed text and touch no state.

/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    responses(
        (status = 200, description = "Placeholder", body = String)
    )
)]
pub async fn register() -> &'static str {
    "register"
}

/// POST /auth/tokens/access
#[utoipa::path(
    post,
    path = "/auth/tokens/access",
    tag = "auth",
    responses(
        (status = 200, description = "Placeholder", body = String)
    )
)]
pub async fn access_token() -> &'static str {
    "token"
}
