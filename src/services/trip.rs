//! Trip services - Creazione e consultazione dei viaggi

use crate::core::{AppError, AppState};
use crate::dtos::{CreateTripDTO, TripDTO, TripDetailDTO, UserDTO};
use crate::entities::User;
use crate::repositories::Read;
use super::parse_uid;
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateTripDTO>,
) -> Result<(StatusCode, Json<TripDTO>), AppError> {
    debug!("Creating trip");
    body.validate()?;

    let trip = state.trip.create_for_owner(current_user.id, &body).await?;

    info!("Trip {} created", trip.uid);
    Ok((StatusCode::CREATED, Json(TripDTO::from(trip))))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<TripDTO>>, AppError> {
    debug!("Listing trips for user");
    let trips = state.trip.list_visible(current_user.id).await?;

    info!("Found {} trips", trips.len());
    Ok(Json(trips.into_iter().map(TripDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(trip_uid = %trip_uid, user_id = %current_user.id))]
pub async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(trip_uid): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<Json<TripDetailDTO>, AppError> {
    debug!("Fetching trip detail");
    // 1. Recuperare il viaggio solo se l'utente ne è owner o membro, altrimenti NOT_FOUND
    // 2. Recuperare gli id dei membri (singola query)
    // 3. Recuperare owner e membri con query parallele per id
    // 4. Comporre il dettaglio

    let trip_uid = parse_uid(&trip_uid, "Trip not found")?;
    let trip = state
        .trip
        .find_visible_by_uid(&trip_uid, current_user.id)
        .await?
        .ok_or_else(|| {
            warn!("Trip not found or not visible");
            AppError::not_found("Trip not found")
        })?;

    let member_ids = state.trip.member_ids(trip.id).await?;
    debug!("Trip has {} members", member_ids.len());

    let members: Vec<UserDTO> = try_join_all(member_ids.iter().map(|id| state.user.read(id)))
        .await?
        .into_iter()
        .flatten()
        .map(UserDTO::from)
        .collect();

    let owner = state.user.read(&trip.owner_id).await?.map(UserDTO::from);

    Ok(Json(TripDetailDTO {
        id: trip.uid,
        title: trip.title,
        created_at: trip.created_at,
        owner,
        members,
    }))
}
