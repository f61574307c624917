use utoipa::OpenApi;

use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Create a new workshop
#[utoipa::path(
    post,
    path = "/api/v1/workshops",
    request_body = CreateWorkshopRequest,
    responses(
        (status = 201, description = "Workshop created successfully", body = WorkshopRecord),
        (status = 400, description = "Missing contentId or createdBy", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn create_workshop_doc() {}

/// List active workshops
#[utoipa::path(
    get,
    path = "/api/v1/workshops/active",
    responses(
        (status = 200, description = "Currently open workshops with occupancy", body = [ActiveWorkshop])
    )
)]
#[allow(dead_code)]
pub async fn active_workshops_doc() {}

/// Hub diagnostics
#[utoipa::path(
    get,
    path = "/api/v1/diagnostics",
    responses(
        (status = 200, description = "Hub and process counters", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        create_workshop_doc,
        active_workshops_doc,
        diagnostics_doc,
    ),
    components(
        schemas(
            HealthResponse,
            CreateWorkshopRequest,
            WorkshopRecord,
            WorkshopStatus,
            ActiveWorkshop,
            DiagnosticsResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
