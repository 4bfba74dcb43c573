//! Destination services - CRUD delle destinazioni di un viaggio
//!
//! Il viaggio è sempre referenziato per uid nei payload; qui viene risolto
//! nell'id interno, controllando che sia visibile all'utente corrente.

use crate::core::{AppError, AppState};
use crate::dtos::{
    CreateDestinationDTO, DestinationDTO, DestinationFields, Page, TripFilterQuery,
    UpdateDestinationDTO,
};
use crate::entities::{Destination, Trip, User};
use crate::repositories::{Create, Delete, Update};
use super::parse_uid;
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Risolve l'uid di viaggio di un payload; un viaggio non visibile è un input non valido
async fn visible_trip(state: &AppState, trip_uid: &Uuid, user_id: i64) -> Result<Trip, AppError> {
    state
        .trip
        .find_visible_by_uid(trip_uid, user_id)
        .await?
        .ok_or_else(|| {
            warn!("Trip {} not visible to user {}", trip_uid, user_id);
            AppError::bad_request("Invalid trip")
                .with_details(format!("Object with uid={} does not exist.", trip_uid))
        })
}

async fn visible_destination(
    state: &AppState,
    destination_uid: &str,
    user_id: i64,
) -> Result<Destination, AppError> {
    let destination_uid = parse_uid(destination_uid, "Destination not found")?;
    state
        .destination
        .find_visible_by_uid(&destination_uid, user_id)
        .await?
        .ok_or_else(|| {
            warn!("Destination not found or not visible");
            AppError::not_found("Destination not found")
        })
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_destinations(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<TripFilterQuery>,
) -> Result<Json<Page<DestinationDTO>>, AppError> {
    debug!("Listing destinations");
    let pagination = state.pagination(params.page, params.page_size)?;

    let count = state
        .destination
        .count_visible(current_user.id, params.trip)
        .await?;
    let destinations = state
        .destination
        .list_visible(current_user.id, params.trip, pagination)
        .await?;

    info!("Returning {} of {} destinations", destinations.len(), count);
    Ok(Json(
        Page::new(destinations, count, pagination)?.map(DestinationDTO::from),
    ))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, trip_uid = %body.trip))]
pub async fn create_destination(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateDestinationDTO>,
) -> Result<(StatusCode, Json<DestinationDTO>), AppError> {
    debug!("Creating destination");
    body.validate()?;

    let trip = visible_trip(&state, &body.trip, current_user.id).await?;
    let fields = DestinationFields {
        trip_id: trip.id,
        title: body.title,
        description: body.description,
        arrival_date: body.arrival_date,
        departure_date: body.departure_date,
    };
    fields.check_dates()?;

    let destination = state.destination.create(&fields).await?;

    info!("Destination {} created in trip {}", destination.uid, trip.uid);
    Ok((StatusCode::CREATED, Json(DestinationDTO::from(destination))))
}

#[instrument(skip(state, current_user), fields(destination_uid = %destination_uid, user_id = %current_user.id))]
pub async fn get_destination(
    State(state): State<Arc<AppState>>,
    Path(destination_uid): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<Json<DestinationDTO>, AppError> {
    debug!("Fetching destination");
    let destination = visible_destination(&state, &destination_uid, current_user.id).await?;
    Ok(Json(DestinationDTO::from(destination)))
}

/// PUT: sostituzione completa, stesso payload della creazione
#[instrument(skip(state, current_user, body), fields(destination_uid = %destination_uid, user_id = %current_user.id))]
pub async fn replace_destination(
    State(state): State<Arc<AppState>>,
    Path(destination_uid): Path<String>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateDestinationDTO>,
) -> Result<Json<DestinationDTO>, AppError> {
    debug!("Replacing destination");
    let current = visible_destination(&state, &destination_uid, current_user.id).await?;
    body.validate()?;

    let trip = visible_trip(&state, &body.trip, current_user.id).await?;
    let fields = DestinationFields {
        trip_id: trip.id,
        title: body.title,
        description: body.description,
        arrival_date: body.arrival_date,
        departure_date: body.departure_date,
    };
    fields.check_dates()?;

    let destination = state.destination.update(&current.id, &fields).await?;

    info!("Destination {} replaced", destination.uid);
    Ok(Json(DestinationDTO::from(destination)))
}

/// PATCH: i campi assenti mantengono il valore corrente
#[instrument(skip(state, current_user, body), fields(destination_uid = %destination_uid, user_id = %current_user.id))]
pub async fn update_destination(
    State(state): State<Arc<AppState>>,
    Path(destination_uid): Path<String>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateDestinationDTO>,
) -> Result<Json<DestinationDTO>, AppError> {
    debug!("Updating destination");
    let current = visible_destination(&state, &destination_uid, current_user.id).await?;
    body.validate()?;

    // Spostamento in un altro viaggio: anche quello deve essere visibile
    let trip_id = match body.trip {
        Some(trip_uid) => visible_trip(&state, &trip_uid, current_user.id).await?.id,
        None => current.trip_id,
    };
    let fields = DestinationFields::merged(&current, trip_id, body);
    fields.check_dates()?;

    let destination = state.destination.update(&current.id, &fields).await?;

    info!("Destination {} updated", destination.uid);
    Ok(Json(DestinationDTO::from(destination)))
}

#[instrument(skip(state, current_user), fields(destination_uid = %destination_uid, user_id = %current_user.id))]
pub async fn delete_destination(
    State(state): State<Arc<AppState>>,
    Path(destination_uid): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    debug!("Deleting destination");
    let destination = visible_destination(&state, &destination_uid, current_user.id).await?;

    state.destination.delete(&destination.id).await?;

    info!("Destination {} deleted", destination.uid);
    Ok(StatusCode::NO_CONTENT)
}
