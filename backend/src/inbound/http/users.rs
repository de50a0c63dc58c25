//! Account API handlers: registration, login and the caller's own profile.
//!
//! ```text
//! POST /api/v1/auth/register {"username":"nora","password":"pw","age":34,...}
//! POST /api/v1/auth/login {"username":"nora","password":"pw"}
//! GET /api/v1/users/me
//! PUT /api/v1/users/me/profile
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedSession, Error, LoginCredentials, RegistrationRequest, ResidenceType, Transport,
    User, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_validation_error;

/// Profile fields shared by registration and profile updates.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub age: u16,
    pub residence_type: ResidenceType,
    pub transport: Transport,
    pub has_pet: bool,
    pub mobility_impaired: bool,
    #[serde(default)]
    pub health_status: String,
}

impl From<ProfileRequest> for UserProfile {
    fn from(value: ProfileRequest) -> Self {
        Self {
            age: value.age,
            residence_type: value.residence_type,
            transport: value.transport,
            has_pet: value.has_pet,
            mobility_impaired: value.mobility_impaired,
            health_status: value.health_status,
        }
    }
}

/// Registration request body for `POST /api/v1/auth/register`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: ProfileRequest,
}

impl TryFrom<RegisterRequest> for RegistrationRequest {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password, value.profile.into())
            .map_err(login_validation_error)
    }
}

/// Login request body for `POST /api/v1/auth/login`.
///
/// Example JSON:
/// `{"username":"nora","password":"correct horse"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password).map_err(login_validation_error)
    }
}

/// Public view of a user. The password hash never leaves the server.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "nora")]
    pub username: String,
    pub age: u16,
    pub residence_type: ResidenceType,
    pub transport: Transport,
    pub has_pet: bool,
    pub mobility_impaired: bool,
    pub health_status: String,
    #[schema(example = "ROLE_USER")]
    pub roles: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            age: profile.age,
            residence_type: profile.residence_type,
            transport: profile.transport,
            has_pet: profile.has_pet,
            mobility_impaired: profile.mobility_impaired,
            health_status: profile.health_status.clone(),
            roles: user.roles().to_owned(),
        }
    }
}

/// Successful login payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

impl From<AuthenticatedSession> for LoginResponse {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            token: session.token.expose().to_owned(),
            token_type: "Bearer".to_owned(),
            expires_at: session.expires_at,
            user: UserResponse::from(&session.user),
        }
    }
}

/// Create an account with the default role.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegistrationRequest::try_from(payload.into_inner())?;
    let user = state.registration.register(request).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange credentials for a bearer token.
///
/// Unknown usernames and wrong passwords produce the same `401` payload.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let session = state.login.authenticate(&credentials).await?;
    info!(user_id = %session.user.id(), "issued bearer token");
    Ok(web::Json(LoginResponse::from(session)))
}

/// Return the authenticated caller's account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.profile.current_user(caller.identity()).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Replace the caller's profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .profile_command
        .update_profile(caller.identity(), payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}
