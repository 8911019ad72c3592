//! REST API layer: route handlers, DTOs, OpenAPI document and router
//! composition.
//!
//! All endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "firstboard", description = "Daily first-claim game: claims, streaks and juice"),
    paths(
        handlers::claims::create_claim,
        handlers::claims::list_claims,
        handlers::boards::current_streak,
        handlers::boards::score_board,
        handlers::boards::juice_board,
        handlers::boards::juice_highscore,
        handlers::boards::history,
        handlers::users::user_stats,
        handlers::users::user_streak,
        handlers::users::user_juice,
        handlers::system::health_handler,
        handlers::system::civil_zone_handler,
    ),
    tags(
        (name = "Claims", description = "Taking today's first"),
        (name = "Boards", description = "Leaderboards and streaks"),
        (name = "Users", description = "Per-member statistics"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
