//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request and response DTOs. The domain error type is described by
//! [`ErrorSchema`] so the domain stays free of utoipa derives. Protected
//! endpoints inherit the document-wide bearer requirement; public ones opt out
//! with `security([])` on their path attribute.

use crate::domain::{ResidenceType, Transport};
use crate::inbound::http::advice::AdviceResponse;
use crate::inbound::http::health::{ProbeBody, StoreKind};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::shelters::{
    NearbyShelterResponse, ShelterPatchRequest, ShelterRequest, ShelterResponse,
};
use crate::inbound::http::users::{
    LoginRequest, LoginResponse, ProfileRequest, RegisterRequest, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Opaque token issued by POST /api/v1/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shelter backend API",
        description = "Shelter directory, accounts and personalised evacuation advice."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::advice::my_advice,
        crate::inbound::http::shelters::list_shelters,
        crate::inbound::http::shelters::nearby_shelters,
        crate::inbound::http::shelters::get_shelter,
        crate::inbound::http::shelters::create_shelter,
        crate::inbound::http::shelters::replace_shelter,
        crate::inbound::http::shelters::patch_shelter,
        crate::inbound::http::shelters::delete_shelter,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        ProfileRequest,
        UserResponse,
        LoginResponse,
        AdviceResponse,
        ShelterRequest,
        ShelterPatchRequest,
        ShelterResponse,
        NearbyShelterResponse,
        ProbeBody,
        StoreKind,
        ResidenceType,
        Transport,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "The authenticated caller's account"),
        (name = "advice", description = "Personalised evacuation advice"),
        (name = "shelters", description = "Shelter directory and proximity search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
