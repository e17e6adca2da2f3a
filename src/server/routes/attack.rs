//! Attack catalog and simulation endpoints

use crate::core::attack::{self, Intensity};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure attack routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ai-attack")
            .route("/vectors", web::get().to(list_vectors))
            .route("/execute", web::post().to(execute_attack)),
    );
}

/// Catalog listing payload
#[derive(Debug, Serialize)]
struct VectorListing {
    vectors: &'static [attack::AttackVector],
    recommended_combos: Vec<attack::ComboRecommendation>,
    statistics: attack::CatalogStatistics,
}

async fn list_vectors() -> HttpResponse {
    info!("attack vector listing requested");

    let listing = VectorListing {
        vectors: attack::catalog(),
        recommended_combos: attack::recommended_combos(),
        statistics: attack::catalog_statistics(),
    };

    HttpResponse::Ok().json(ApiResponse::success(listing))
}

#[derive(Debug, Deserialize)]
struct ExecuteAttackBody {
    /// Defaults to A1, the baseline vector
    #[serde(default)]
    vector_ids: Option<Vec<String>>,
    #[serde(default)]
    intensity: Option<Intensity>,
}

async fn execute_attack(
    state: web::Data<AppState>,
    body: web::Json<ExecuteAttackBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let vector_ids = body
        .vector_ids
        .unwrap_or_else(|| vec!["A1".to_string()]);
    let intensity = body.intensity.unwrap_or_default();

    info!(vectors = ?vector_ids, intensity = intensity.as_str(), "executing simulated attack run");
    let report = state.simulator.execute(&vector_ids, intensity)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}
