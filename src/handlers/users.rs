use crate::app_state::AppState;
use crate::auth::{compare_password, hash_password};
use crate::error::ApiError;
use crate::models::{AuthResponse, NewUser, SignInInput, SignUpInput};
use actix_web::{web, HttpResponse};

pub async fn sign_up(
    state: web::Data<AppState>,
    new_user: web::Json<SignUpInput>,
) -> Result<HttpResponse, ApiError> {
    let SignUpInput {
        username,
        email,
        password,
    } = new_user.into_inner();
    let email = email.trim().to_string();
    if username.trim().is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::bad_request(
            "username, email and password are required",
        ));
    }

    let password_hash = web::block(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal("Password hashing was cancelled", e))??;
    let user = state
        .users
        .create_user(NewUser {
            name: username,
            email,
            password_hash,
        })
        .await?;
    log::info!("Registered user {}", user.id);

    let token = state.tokens.issue(&user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        token,
    }))
}

pub async fn login(
    state: web::Data<AppState>,
    data: web::Json<SignInInput>,
) -> Result<HttpResponse, ApiError> {
    let SignInInput { email, password } = data.into_inner();
    let user = state
        .users
        .find_user_by_email(email.trim())
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let stored = user.password.clone();
    let matches = web::block(move || compare_password(&password, &stored))
        .await
        .map_err(|e| ApiError::internal("Password check was cancelled", e))?;
    if !matches {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        token,
    }))
}
