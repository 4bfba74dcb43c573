//! Admin services - Superficie di consultazione per utenti staff

use crate::core::{AppError, AppState};
use crate::dtos::{Page, PageQuery};
use crate::entities::{AdminDestinationRow, User};
use axum::{
    Extension,
    extract::{Json, Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Tutte le destinazioni, ordinate per titolo, con il titolo del viaggio
#[instrument(skip(state, current_user), fields(staff_id = %current_user.id))]
pub async fn list_admin_destinations(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page<AdminDestinationRow>>, AppError> {
    debug!("Admin listing destinations");
    let pagination = state.pagination(params.page, params.page_size)?;

    let count = state.destination.count_all().await?;
    let rows = state.destination.list_admin(pagination).await?;

    info!("Returning {} of {} destinations", rows.len(), count);
    Ok(Json(Page::new(rows, count, pagination)?))
}
