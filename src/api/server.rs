use crate::api::handlers;
use crate::config::Settings;
use crate::domain::ports::{InventoryStore, PlanHistory};
use crate::utils::error::Result;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application context passed to all handlers.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn InventoryStore>,
    pub history: Arc<dyn PlanHistory>,
    pub settings: Settings,
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/tanks", get(handlers::list_tanks).post(handlers::add_tank))
        .route("/tanks/export", get(handlers::export_tanks))
        .route("/tanks/import", post(handlers::import_tanks))
        .route(
            "/tanks/:name",
            put(handlers::edit_tank).delete(handlers::delete_tank),
        )
        .route("/plan", post(handlers::create_plan))
        .route("/plans", get(handlers::list_plans))
        .route(
            "/plans/:name",
            post(handlers::save_plan)
                .get(handlers::get_plan)
                .delete(handlers::delete_plan),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

pub async fn run(ctx: AppContext) -> Result<()> {
    let bind = ctx.settings.bind;
    let app = router(ctx);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("listening on http://{}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}
