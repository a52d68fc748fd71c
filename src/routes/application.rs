use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicantResponse, ApplicationResponse, AppliedStatusResponse, ApplyPayload,
        ApplySuccessResponse,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/offerings/{id}/apply",
    params(
        ("id" = Uuid, Path, description = "Offering ID")
    ),
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplySuccessResponse>),
        (status = 400, description = "Already applied to this offering"),
        (status = 404, description = "Offering not found")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_offering(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let applicant_id = claims.user_id()?;
    let application = state
        .application_service
        .apply(id, applicant_id, payload.message)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplySuccessResponse {
            message: "Application submitted successfully".to_string(),
            application: application.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/offerings/{id}/applied",
    params(
        ("id" = Uuid, Path, description = "Offering ID")
    ),
    responses(
        (status = 200, description = "Whether the caller has applied", body = Json<AppliedStatusResponse>)
    )
)]
#[axum::debug_handler]
pub async fn check_applied(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applicant_id = claims.user_id()?;
    let application = state
        .application_service
        .application_for(id, applicant_id)
        .await?;
    Ok(Json(AppliedStatusResponse {
        has_applied: application.is_some(),
        application: application.map(ApplicationResponse::from),
    }))
}

#[utoipa::path(
    get,
    path = "/api/offerings/{id}/applicants",
    params(
        ("id" = Uuid, Path, description = "Offering ID")
    ),
    responses(
        (status = 200, description = "Applications with applicant details", body = Json<Vec<ApplicantResponse>>),
        (status = 403, description = "Caller does not own this offering"),
        (status = 404, description = "Offering not found")
    )
)]
#[axum::debug_handler]
pub async fn list_applicants(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let caller = claims.user_id()?;
    let applicants = state.application_service.list_applicants(id, caller).await?;
    let body: Vec<ApplicantResponse> = applicants
        .into_iter()
        .map(|(application, user)| ApplicantResponse {
            application: application.into(),
            applicant_details: user.map(Into::into),
        })
        .collect();
    Ok(Json(body))
}
