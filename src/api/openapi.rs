//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{chat, health, revenue};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VenueSync API",
        version = "1.0.0",
        description = "Venue analytics and revenue chat REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "VenueSync Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Chat
        chat::chat,
        // Revenue
        revenue::get_revenue,
        revenue::reconcile,
    ),
    components(
        schemas(
            // Chat
            chat::ChatRequest,
            chat::ChatResponse,
            crate::services::context::ChatContext,
            crate::services::context::Visualization,
            crate::nlq::dates::ParsedDateRange,
            crate::nlq::classifier::QueryType,
            // Revenue
            revenue::AggregationResult,
            revenue::DailyRevenue,
            revenue::PeriodComparison,
            revenue::ReconciliationReport,
            revenue::RevenueQuery,
            crate::models::revenue_day::RevenueDay,
            // Errors
            crate::error::ErrorResponse,
            // Health
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health endpoints"),
        (name = "chat", description = "Natural-language revenue chat"),
        (name = "revenue", description = "Revenue aggregates and reconciliation")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
