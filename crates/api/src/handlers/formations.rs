//! Handlers for the `/formations` resource: the formation switcher's
//! catalogue and side-effect-free layout previews.

use axum::Json;
use serde::{Deserialize, Serialize};
use touchline_core::formation::FormationDescriptor;
use touchline_core::layout::{has_curated_layout, layout_for, supported_formations, SlotTemplate};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;

/// Request body carrying a formation code, e.g. `{ "formation": "4-3-3" }`.
#[derive(Debug, Deserialize)]
pub struct FormationRequest {
    pub formation: String,
}

/// The slots a formation code would produce.
#[derive(Debug, Serialize)]
pub struct FormationPreview {
    pub formation: String,
    /// `false` when the generic staircase layout is used.
    pub curated: bool,
    pub slots: Vec<SlotTemplate>,
}

impl FormationPreview {
    pub fn new(formation: &str, slots: Vec<SlotTemplate>) -> Self {
        Self {
            formation: formation.to_string(),
            curated: has_curated_layout(formation),
            slots,
        }
    }
}

/// GET /api/v1/formations
pub async fn list(
    RequireStaff(_user): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<FormationDescriptor>>>> {
    let formations = supported_formations()
        .into_iter()
        .map(FormationDescriptor::parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(DataResponse { data: formations }))
}

/// POST /api/v1/formations/preview
pub async fn preview(
    RequireStaff(_user): RequireStaff,
    Json(input): Json<FormationRequest>,
) -> AppResult<Json<DataResponse<FormationPreview>>> {
    let formation = input.formation.as_str();
    let slots = layout_for(formation)?;
    Ok(Json(DataResponse {
        data: FormationPreview::new(formation, slots),
    }))
}
