//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::{AppError, AppState, Credentials, encode_jwt};
use crate::dtos::{CreateUserDTO, LoginDTO, UserDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    Extension,
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

const TOKEN_MAX_AGE_SECS: u32 = 24 * 60 * 60;

#[instrument(skip(state, body))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt");
    // 1. Passare email e password alla catena di backend di autenticazione
    // 2. Nessun backend riconosce le credenziali -> UNAUTHORIZED (stesso errore per email o password errate)
    // 3. Generare un token JWT con id ed email dell'utente
    // 4. Restituire il token sia come cookie HttpOnly sia nell'header Authorization

    let credentials = Credentials {
        username: body.email,
        password: body.password,
    };

    let Some(user) = state.auth.authenticate(&credentials).await? else {
        warn!("Invalid credentials");
        return Err(AppError::unauthorized("Email or password are not correct"));
    };

    let token = encode_jwt(user.email.clone(), user.id, &state.jwt_secret)?;

    let cookie_value = format!(
        "token={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        token, TOKEN_MAX_AGE_SECS
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, header_value(&cookie_value)?);
    headers.insert(header::AUTHORIZATION, header_value(&format!("Bearer {}", token))?);

    info!("User {} logged in", user.id);
    Ok((StatusCode::OK, headers))
}

#[instrument(skip(state, body))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>, // JSON body
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    debug!("Registering new user");
    // 1. Normalizzare l'email e validare il DTO (formato email, lunghezza password)
    // 2. Verificare che la password contenga almeno una lettera e una cifra
    // 3. Se esiste già un utente con la stessa email -> CONFLICT
    // 4. Hashare la password e salvare l'utente
    // 5. Restituire l'utente creato (senza password) con CREATED

    let body = body.normalized();
    body.validate()?;

    if !body.has_strong_password() {
        warn!("Weak password rejected");
        return Err(AppError::bad_request("Validation error")
            .with_details("password must contain at least one letter and one digit"));
    }

    if state.user.find_by_email(&body.email).await?.is_some() {
        warn!("Email already registered");
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = User::hash_password(&body.password).map_err(|e| {
        error!("Failed to hash password: {:?}", e);
        AppError::internal_server_error("Failed to hash password")
    })?;

    let created_user = state
        .user
        .create(&CreateUserDTO {
            email: body.email,
            password: password_hash,
        })
        .await?;

    info!("User {} registered", created_user.id);
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}

#[instrument(skip(current_user), fields(user_id = %current_user.id))]
pub async fn get_me(
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Json<UserDTO> {
    Json(UserDTO::from(current_user))
}

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|e| {
        error!("Invalid header value: {:?}", e);
        AppError::internal_server_error("Internal server error")
    })
}
