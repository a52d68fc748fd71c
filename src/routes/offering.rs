use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::offering_dto::{
        CreateOfferingPayload, OfferingDetailResponse, OfferingListQuery, OfferingListResponse,
        OfferingResponse, UpdateOfferingPayload,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/offerings",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on label/description (alias: q)"),
        ("type" = Option<String>, Query, description = "Exact category match"),
        ("minPay" = Option<String>, Query, description = "Minimum payment per hour (alias: minPayment)"),
        ("maxPay" = Option<String>, Query, description = "Maximum payment per hour (alias: maxPayment)"),
        ("maxHours" = Option<String>, Query, description = "Keep offerings needing at most this many hours"),
        ("hasApplications" = Option<String>, Query, description = "true/false presence filter on applications"),
        ("lat" = Option<String>, Query, description = "Bounding-box center latitude"),
        ("lng" = Option<String>, Query, description = "Bounding-box center longitude"),
        ("radiusKm" = Option<String>, Query, description = "Bounding-box radius in km"),
        ("sortBy" = Option<String>, Query, description = "date | payment | hours | applications"),
        ("sortOrder" = Option<String>, Query, description = "asc | desc"),
        ("page" = Option<String>, Query, description = "1-based page index"),
        ("limit" = Option<String>, Query, description = "Page size"),
        ("featuredFirst" = Option<String>, Query, description = "Pin featured offerings to the front"),
        ("legacy" = Option<String>, Query, description = "Bare-array compatibility mode")
    ),
    responses(
        (status = 200, description = "Paginated offering listing", body = Json<OfferingListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_offerings(
    State(state): State<AppState>,
    Query(raw): Query<OfferingListQuery>,
) -> Result<Response> {
    if raw.wants_legacy() {
        let items = state.offering_service.list_legacy(&raw).await?;
        let body: Vec<OfferingResponse> = items.into_iter().map(Into::into).collect();
        return Ok(Json(body).into_response());
    }
    let page = state.offering_service.list(&raw).await?;
    Ok(Json(OfferingListResponse::from(page)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/offerings",
    request_body = CreateOfferingPayload,
    responses(
        (status = 201, description = "Offering created successfully", body = Json<OfferingResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Authentication required")
    )
)]
#[axum::debug_handler]
pub async fn create_offering(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateOfferingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let requestor_id = claims.user_id()?;
    let offering = state.offering_service.create(payload, requestor_id).await?;
    Ok((StatusCode::CREATED, Json(OfferingResponse::from(offering))))
}

#[utoipa::path(
    get,
    path = "/api/offerings/{id}",
    params(
        ("id" = Uuid, Path, description = "Offering ID")
    ),
    responses(
        (status = 200, description = "Offering with requestor projection", body = Json<OfferingDetailResponse>),
        (status = 404, description = "Offering not found")
    )
)]
#[axum::debug_handler]
pub async fn get_offering(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (offering, requestor) = state.offering_service.get_with_requestor(id).await?;
    Ok(Json(OfferingDetailResponse {
        offering: offering.into(),
        requestor: requestor.map(Into::into),
    }))
}

#[utoipa::path(
    put,
    path = "/api/offerings/{id}",
    params(
        ("id" = Uuid, Path, description = "Offering ID")
    ),
    request_body = UpdateOfferingPayload,
    responses(
        (status = 200, description = "Offering updated successfully", body = Json<OfferingResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller does not own this offering"),
        (status = 404, description = "Offering not found")
    )
)]
#[axum::debug_handler]
pub async fn update_offering(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOfferingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let caller = claims.user_id()?;
    let offering = state.offering_service.update(id, payload, caller).await?;
    Ok(Json(OfferingResponse::from(offering)))
}

#[utoipa::path(
    delete,
    path = "/api/offerings/{id}",
    params(
        ("id" = Uuid, Path, description = "Offering ID")
    ),
    responses(
        (status = 204, description = "Offering deleted successfully"),
        (status = 403, description = "Caller does not own this offering"),
        (status = 404, description = "Offering not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_offering(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let caller = claims.user_id()?;
    state.offering_service.delete(id, caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
