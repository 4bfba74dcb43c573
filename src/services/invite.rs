//! Invite services - Ciclo di vita degli inviti ai viaggi
//!
//! Ogni azione (cancel/accept/reject) rilegge prima l'invito filtrato su `pending`
//! dall'ambito corretto: se non c'è, la risposta è sempre NOT_FOUND, che l'invito
//! non esista, sia già chiuso o (per accept/reject) sia indirizzato a un'altra email.

use crate::core::{AppError, AppState};
use crate::dtos::{CreateInviteDTO, InviteDTO, Page, TripFilterQuery};
use crate::entities::{Invite, InviteAction, User};
use crate::repositories::{Create, InviteFilter, NewInvite};
use super::parse_uid;
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Recupera l'invito pending indirizzato all'utente corrente.
/// Un'email diversa è un NOT_FOUND, per non confermare l'esistenza dell'invito.
async fn pending_invite_for_recipient(
    state: &AppState,
    invite_uid: &str,
    current_user: &User,
) -> Result<Invite, AppError> {
    let invite_uid = parse_uid(invite_uid, "Invite not found")?;
    let invite = state
        .invite
        .find_pending_by_uid(&invite_uid)
        .await?
        .ok_or_else(|| {
            warn!("Pending invite not found");
            AppError::not_found("Invite not found")
        })?;

    if !invite.is_addressed_to(&current_user.email) {
        warn!("Invite {} is not addressed to user {}", invite.id, current_user.id);
        return Err(AppError::not_found("Invite not found"));
    }

    Ok(invite)
}

/// Accesso pubblico (senza autenticazione) a un singolo invito: solo se pending
#[instrument(skip(state), fields(invite_uid = %invite_uid))]
pub async fn get_public_invite(
    State(state): State<Arc<AppState>>,
    Path(invite_uid): Path<String>,
) -> Result<Json<InviteDTO>, AppError> {
    debug!("Public invite lookup");
    let invite_uid = parse_uid(&invite_uid, "Invite not found")?;
    let invite = state
        .invite
        .find_pending_by_uid(&invite_uid)
        .await?
        .ok_or_else(|| {
            warn!("Public lookup of missing or resolved invite");
            AppError::not_found("Invite not found")
        })?;

    Ok(Json(InviteDTO::from(invite)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, trip_uid = %body.trip))]
pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateInviteDTO>,
) -> Result<(StatusCode, Json<InviteDTO>), AppError> {
    debug!("Creating invite");
    // 1. Normalizzare l'email (minuscolo, trim) e validare il DTO
    // 2. Il viaggio deve essere visibile all'utente (owner o membro), altrimenti BAD_REQUEST
    // 3. Un solo invito per coppia viaggio/email: se esiste già -> CONFLICT
    //    (il vincolo UNIQUE copre comunque le richieste concorrenti)
    // 4. Creare l'invito in stato pending e restituirlo con CREATED

    let body = body.normalized();
    body.validate()?;

    let trip = state
        .trip
        .find_visible_by_uid(&body.trip, current_user.id)
        .await?
        .ok_or_else(|| {
            warn!("Trip not found or not visible");
            AppError::bad_request("Invalid trip").with_details(format!(
                "Object with uid={} does not exist.",
                body.trip
            ))
        })?;

    if state.invite.exists_for(trip.id, &body.email).await? {
        warn!("Invite already exists for this trip and email");
        return Err(AppError::conflict("This email has already been invited to the trip"));
    }

    let invite = state
        .invite
        .create(&NewInvite {
            trip_id: trip.id,
            email: body.email,
        })
        .await?;

    info!("Invite created: {}", invite);
    Ok((StatusCode::CREATED, Json(InviteDTO::from(invite))))
}

/// Inviti dei viaggi di cui l'utente è owner o membro, filtrabili con ?trip=<uid>
#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_invites(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<TripFilterQuery>,
) -> Result<Json<Page<InviteDTO>>, AppError> {
    debug!("Listing invites");
    let filter = InviteFilter::for_user(current_user.id).trip(params.trip);
    list_page(&state, &filter, &params).await
}

/// Come `list_invites`, solo inviti pending
#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_pending_invites(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<TripFilterQuery>,
) -> Result<Json<Page<InviteDTO>>, AppError> {
    debug!("Listing pending invites");
    let filter = InviteFilter::for_user(current_user.id)
        .trip(params.trip)
        .pending();
    list_page(&state, &filter, &params).await
}

async fn list_page(
    state: &AppState,
    filter: &InviteFilter,
    params: &TripFilterQuery,
) -> Result<Json<Page<InviteDTO>>, AppError> {
    let pagination = state.pagination(params.page, params.page_size)?;

    let count = state.invite.count(filter).await?;
    let invites = state.invite.list(filter, pagination).await?;

    info!("Returning {} of {} invites", invites.len(), count);
    Ok(Json(Page::new(invites, count, pagination)?.map(InviteDTO::from)))
}

#[debug_handler]
#[instrument(skip(state, current_user), fields(invite_uid = %invite_uid, user_id = %current_user.id))]
pub async fn cancel_invite(
    State(state): State<Arc<AppState>>,
    Path(invite_uid): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    debug!("Cancelling invite");
    // 1. Recuperare l'invito pending dall'ambito dell'utente (owner o membro), altrimenti NOT_FOUND
    // 2. Solo l'owner del viaggio può annullare -> FORBIDDEN
    // 3. Transizione condizionale pending -> cancelled (NOT_FOUND se nel frattempo è cambiato)

    let invite_uid = parse_uid(&invite_uid, "Invite not found")?;
    let filter = InviteFilter::for_user(current_user.id).pending();
    let invite = state
        .invite
        .find_in_scope(&filter, &invite_uid)
        .await?
        .ok_or_else(|| {
            warn!("Pending invite not found in user scope");
            AppError::not_found("Invite not found")
        })?;

    if !invite.is_trip_owner(current_user.id) {
        warn!("User {} is not the owner of the invite's trip", current_user.id);
        return Err(AppError::forbidden("Only the trip owner can cancel an invite"));
    }

    state.invite.transition(invite.id, InviteAction::Cancel).await?;

    info!("Invite cancelled: {}", invite);
    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler]
#[instrument(skip(state, current_user), fields(invite_uid = %invite_uid, user_id = %current_user.id))]
pub async fn accept_invite(
    State(state): State<Arc<AppState>>,
    Path(invite_uid): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    debug!("Accepting invite");
    // 1. Recuperare l'invito pending indirizzato all'email dell'utente, altrimenti NOT_FOUND
    // 2. L'utente non deve essere già owner o membro del viaggio -> BAD_REQUEST
    // 3. In un'unica transazione: pending -> accepted e aggiunta ai membri

    let invite = pending_invite_for_recipient(&state, &invite_uid, &current_user).await?;

    let is_owner = invite.is_trip_owner(current_user.id);
    let is_member = state.trip.is_member(invite.trip_id, current_user.id).await?;
    if is_owner || is_member {
        warn!("User {} is already involved in trip {}", current_user.id, invite.trip_id);
        return Err(AppError::bad_request(
            "User is already a member or owner of the trip.",
        ));
    }

    state
        .invite
        .accept(invite.id, invite.trip_id, current_user.id)
        .await?;

    info!("Invite accepted: {}", invite);
    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler]
#[instrument(skip(state, current_user), fields(invite_uid = %invite_uid, user_id = %current_user.id))]
pub async fn reject_invite(
    State(state): State<Arc<AppState>>,
    Path(invite_uid): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    debug!("Rejecting invite");
    let invite = pending_invite_for_recipient(&state, &invite_uid, &current_user).await?;

    state.invite.transition(invite.id, InviteAction::Reject).await?;

    info!("Invite rejected: {}", invite);
    Ok(StatusCode::NO_CONTENT)
}
