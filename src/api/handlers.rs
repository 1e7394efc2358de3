use crate::adapters::csv_io;
use crate::api::server::AppContext;
use crate::core::engine::{BlendEngine, PlanOptions};
use crate::domain::model::{PlanSummary, SavedPlan, Tank, TankPatch};
use crate::utils::error::BlendError;
use crate::utils::validation::validate_tolerance;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    message: String,
    imported: usize,
}

/// Body for `POST /plan`; both knobs are optional.
#[derive(Debug, Default, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub fill_empty: bool,
    pub tolerance: Option<f64>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn list_tanks(State(ctx): State<AppContext>) -> Json<Vec<Tank>> {
    Json(ctx.store.snapshot())
}

pub async fn add_tank(
    State(ctx): State<AppContext>,
    Json(tank): Json<Tank>,
) -> Result<impl IntoResponse, BlendError> {
    let stored = ctx.store.insert(tank)?;
    info!(tank = %stored.name, "tank created");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn edit_tank(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
    Json(patch): Json<TankPatch>,
) -> Result<Json<Tank>, BlendError> {
    Ok(Json(ctx.store.update(&name, patch)?))
}

pub async fn delete_tank(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, BlendError> {
    ctx.store.remove(&name)?;
    info!(tank = %name, "tank deleted");
    Ok(Json(MessageResponse {
        message: format!("Tank '{}' deleted.", name),
    }))
}

pub async fn export_tanks(
    State(ctx): State<AppContext>,
) -> Result<impl IntoResponse, BlendError> {
    let csv = csv_io::export_csv(&ctx.store.snapshot())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"tanks.csv\"",
            ),
        ],
        csv,
    ))
}

pub async fn import_tanks(
    State(ctx): State<AppContext>,
    body: String,
) -> Result<Json<ImportResponse>, BlendError> {
    let tanks = csv_io::import_csv(&body)?;
    let imported = tanks.len();
    for tank in tanks {
        ctx.store.upsert(tank)?;
    }
    info!(imported, "inventory imported");
    Ok(Json(ImportResponse {
        message: "Tanks imported successfully.".to_string(),
        imported,
    }))
}

pub async fn create_plan(
    State(ctx): State<AppContext>,
    payload: Option<Json<PlanRequest>>,
) -> Result<Json<PlanSummary>, BlendError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let tolerance = request.tolerance.unwrap_or(ctx.settings.tolerance);
    validate_tolerance(tolerance)?;

    let engine = BlendEngine::new(PlanOptions {
        tolerance,
        fill_empty: request.fill_empty,
    });
    let summary = engine.plan_summary(&ctx.store.snapshot())?;
    Ok(Json(summary))
}

pub async fn save_plan(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
    Json(summary): Json<PlanSummary>,
) -> Result<impl IntoResponse, BlendError> {
    let plan = SavedPlan {
        name,
        saved_at: Utc::now(),
        summary,
    };
    ctx.history.save(plan.clone())?;
    info!(plan = %plan.name, "plan saved");
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn get_plan(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<SavedPlan>, BlendError> {
    Ok(Json(ctx.history.load(&name)?))
}

pub async fn list_plans(State(ctx): State<AppContext>) -> Json<Vec<String>> {
    Json(ctx.history.list())
}

pub async fn delete_plan(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, BlendError> {
    ctx.history.remove(&name)?;
    Ok(Json(MessageResponse {
        message: format!("Plan '{}' deleted.", name),
    }))
}
