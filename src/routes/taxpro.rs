use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, state::AppState, taxpro, types::TaxPro};

/// `GET /taxpro/{year}/{efin}`: zero or one tax professional as a JSON array.
///
/// A failing query becomes a single 404 body carrying the error text.
pub async fn get_taxpro(
    State(state): State<AppState>,
    Path((year, efin)): Path<(String, String)>,
) -> AppResult<Json<Vec<TaxPro>>> {
    let results = taxpro::find_taxpros(&state.db, &year, &efin).await?;
    Ok(Json(results))
}
