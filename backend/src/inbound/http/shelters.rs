//! Shelter directory handlers.
//!
//! ```text
//! GET    /api/v1/shelters
//! GET    /api/v1/shelters/nearby?lat=37.56&lng=126.97&maxDistance=2000
//! GET    /api/v1/shelters/{id}
//! POST   /api/v1/shelters            (bearer)
//! PUT    /api/v1/shelters/{id}       (bearer)
//! PATCH  /api/v1/shelters/{id}       (bearer)
//! DELETE /api/v1/shelters/{id}       (bearer)
//! ```
//!
//! Reads are public. Mutations require a bearer token; any authenticated
//! user may edit the directory.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    Coordinates, Error, NearbyQuery, NearbyShelter, Shelter, ShelterFields, ShelterPatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, nearby_validation_error, parse_shelter_id};

/// Full shelter body for `POST` and `PUT`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported by name instead of as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelterRequest {
    #[schema(example = "Seoul City Hall B2")]
    pub name: Option<String>,
    #[schema(example = "110 Sejong-daero, Jung-gu")]
    pub address: Option<String>,
    #[schema(example = 37.5663)]
    pub latitude: Option<f64>,
    #[schema(example = 126.9779)]
    pub longitude: Option<f64>,
    #[schema(example = 350)]
    pub capacity: Option<u32>,
    #[serde(rename = "type")]
    #[schema(example = "underground")]
    pub shelter_type: Option<String>,
    #[schema(example = "02-120")]
    pub contact: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, Error> {
    value.ok_or_else(|| {
        field_error(field, "missing_field", format!("missing required field: {field}"))
    })
}

impl TryFrom<ShelterRequest> for ShelterFields {
    type Error = Error;

    fn try_from(value: ShelterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(value.name, "name")?,
            address: required(value.address, "address")?,
            latitude: required(value.latitude, "latitude")?,
            longitude: required(value.longitude, "longitude")?,
            capacity: required(value.capacity, "capacity")?,
            shelter_type: value.shelter_type,
            contact: value.contact,
        })
    }
}

/// Partial shelter body for `PATCH`. Absent fields are left unchanged; an
/// empty `type` or `contact` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelterPatchRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<u32>,
    #[serde(rename = "type")]
    pub shelter_type: Option<String>,
    pub contact: Option<String>,
}

impl From<ShelterPatchRequest> for ShelterPatch {
    fn from(value: ShelterPatchRequest) -> Self {
        Self {
            name: value.name,
            address: value.address,
            latitude: value.latitude,
            longitude: value.longitude,
            capacity: value.capacity,
            shelter_type: value.shelter_type,
            contact: value.contact,
        }
    }
}

/// Shelter as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelterResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub shelter_type: Option<String>,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Shelter> for ShelterResponse {
    fn from(shelter: &Shelter) -> Self {
        Self {
            id: shelter.id().to_string(),
            name: shelter.name().to_owned(),
            address: shelter.address().to_owned(),
            latitude: shelter.location().latitude(),
            longitude: shelter.location().longitude(),
            capacity: shelter.capacity(),
            shelter_type: shelter.shelter_type().map(str::to_owned),
            contact: shelter.contact().map(str::to_owned),
            created_at: shelter.created_at(),
            updated_at: shelter.updated_at(),
        }
    }
}

/// Search result: a shelter plus its distance from the query origin.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyShelterResponse {
    #[serde(flatten)]
    pub shelter: ShelterResponse,
    #[schema(example = 412.7)]
    pub distance_meters: f64,
}

impl From<&NearbyShelter> for NearbyShelterResponse {
    fn from(value: &NearbyShelter) -> Self {
        Self {
            shelter: ShelterResponse::from(&value.shelter),
            distance_meters: value.distance_meters,
        }
    }
}

/// Query string for `GET /api/v1/shelters/nearby`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyParams {
    pub lat: f64,
    pub lng: f64,
    pub max_distance: Option<f64>,
    pub limit: Option<usize>,
    pub min_capacity: Option<u32>,
    #[serde(rename = "type")]
    pub shelter_type: Option<String>,
}

impl TryFrom<NearbyParams> for NearbyQuery {
    type Error = Error;

    fn try_from(value: NearbyParams) -> Result<Self, Self::Error> {
        let origin = Coordinates::new(value.lat, value.lng).map_err(nearby_validation_error)?;
        let query = NearbyQuery::new(origin, value.max_distance, value.limit)
            .map_err(nearby_validation_error)?
            .with_min_capacity(value.min_capacity);
        Ok(match value.shelter_type {
            Some(types) => query.with_shelter_types(types.split(',')),
            None => query,
        })
    }
}

fn to_responses(shelters: &[Shelter]) -> Vec<ShelterResponse> {
    shelters.iter().map(ShelterResponse::from).collect()
}

/// List every shelter ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/shelters",
    responses(
        (status = 200, description = "All shelters", body = [ShelterResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["shelters"],
    operation_id = "listShelters",
    security([])
)]
#[get("/shelters")]
pub async fn list_shelters(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ShelterResponse>>> {
    let shelters = state.shelters_query.list().await?;
    Ok(web::Json(to_responses(&shelters)))
}

/// Shelters within `maxDistance` metres of a point, nearest first.
#[utoipa::path(
    get,
    path = "/api/v1/shelters/nearby",
    params(
        ("lat" = f64, Query, description = "Origin latitude in decimal degrees"),
        ("lng" = f64, Query, description = "Origin longitude in decimal degrees"),
        ("maxDistance" = Option<f64>, Query, description = "Search radius in metres, default 5000"),
        ("limit" = Option<usize>, Query, description = "Maximum results, default 10, clamped to 1..=100"),
        ("minCapacity" = Option<u32>, Query, description = "Only shelters holding at least this many people"),
        ("type" = Option<String>, Query, description = "Comma-separated shelter types, case-insensitive")
    ),
    responses(
        (status = 200, description = "Nearby shelters", body = [NearbyShelterResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["shelters"],
    operation_id = "nearbyShelters",
    security([])
)]
#[get("/shelters/nearby")]
pub async fn nearby_shelters(
    state: web::Data<HttpState>,
    params: web::Query<NearbyParams>,
) -> ApiResult<web::Json<Vec<NearbyShelterResponse>>> {
    let query = NearbyQuery::try_from(params.into_inner())?;
    let found = state.shelters_query.nearby(&query).await?;
    Ok(web::Json(found.iter().map(NearbyShelterResponse::from).collect()))
}

/// Fetch one shelter.
#[utoipa::path(
    get,
    path = "/api/v1/shelters/{id}",
    params(("id" = String, Path, description = "Shelter identifier (UUID)")),
    responses(
        (status = 200, description = "Shelter", body = ShelterResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["shelters"],
    operation_id = "getShelter",
    security([])
)]
#[get("/shelters/{id}")]
pub async fn get_shelter(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShelterResponse>> {
    let id = parse_shelter_id(&path)?;
    let shelter = state.shelters_query.get(&id).await?;
    Ok(web::Json(ShelterResponse::from(&shelter)))
}

/// Register a new shelter.
#[utoipa::path(
    post,
    path = "/api/v1/shelters",
    request_body = ShelterRequest,
    responses(
        (status = 201, description = "Created", body = ShelterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["shelters"],
    operation_id = "createShelter"
)]
#[post("/shelters")]
pub async fn create_shelter(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<ShelterRequest>,
) -> ApiResult<HttpResponse> {
    let fields = ShelterFields::try_from(payload.into_inner())?;
    let shelter = state.shelters.create(fields).await?;
    info!(
        shelter_id = %shelter.id(),
        user_id = %caller.identity().user_id(),
        "shelter created"
    );
    Ok(HttpResponse::Created().json(ShelterResponse::from(&shelter)))
}

/// Replace every client-controlled field of a shelter.
#[utoipa::path(
    put,
    path = "/api/v1/shelters/{id}",
    params(("id" = String, Path, description = "Shelter identifier (UUID)")),
    request_body = ShelterRequest,
    responses(
        (status = 200, description = "Updated", body = ShelterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["shelters"],
    operation_id = "replaceShelter"
)]
#[put("/shelters/{id}")]
pub async fn replace_shelter(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<ShelterRequest>,
) -> ApiResult<web::Json<ShelterResponse>> {
    let id = parse_shelter_id(&path)?;
    let fields = ShelterFields::try_from(payload.into_inner())?;
    let shelter = state.shelters.replace(&id, fields).await?;
    Ok(web::Json(ShelterResponse::from(&shelter)))
}

/// Change only the supplied fields of a shelter.
#[utoipa::path(
    patch,
    path = "/api/v1/shelters/{id}",
    params(("id" = String, Path, description = "Shelter identifier (UUID)")),
    request_body = ShelterPatchRequest,
    responses(
        (status = 200, description = "Updated", body = ShelterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["shelters"],
    operation_id = "patchShelter"
)]
#[patch("/shelters/{id}")]
pub async fn patch_shelter(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<ShelterPatchRequest>,
) -> ApiResult<web::Json<ShelterResponse>> {
    let id = parse_shelter_id(&path)?;
    let shelter = state
        .shelters
        .patch(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(ShelterResponse::from(&shelter)))
}

/// Remove a shelter.
#[utoipa::path(
    delete,
    path = "/api/v1/shelters/{id}",
    params(("id" = String, Path, description = "Shelter identifier (UUID)")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["shelters"],
    operation_id = "deleteShelter"
)]
#[delete("/shelters/{id}")]
pub async fn delete_shelter(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_shelter_id(&path)?;
    state.shelters.delete(&id).await?;
    info!(
        shelter_id = %id,
        user_id = %caller.identity().user_id(),
        "shelter deleted"
    );
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "shelters_tests.rs"]
mod tests;
