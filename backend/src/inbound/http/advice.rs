//! Evacuation advice for the authenticated caller.
//!
//! ```text
//! GET /api/v1/advice/me -> {"code":"mobility_rescue","advice":"..."}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Advice;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Advice payload: a stable code plus the human-readable recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AdviceResponse {
    #[schema(example = "general_evacuation")]
    pub code: String,
    #[schema(example = "begin evacuation now; detailed guidance depends on situation")]
    pub advice: String,
}

impl From<Advice> for AdviceResponse {
    fn from(advice: Advice) -> Self {
        Self {
            code: advice.code().to_owned(),
            advice: advice.message().to_owned(),
        }
    }
}

/// Personalised evacuation recommendation derived from the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/advice/me",
    responses(
        (status = 200, description = "Recommendation", body = AdviceResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User no longer exists", body = ErrorSchema)
    ),
    tags = ["advice"],
    operation_id = "myAdvice"
)]
#[get("/advice/me")]
pub async fn my_advice(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<AdviceResponse>> {
    let advice = state.advice.advice_for(caller.identity()).await?;
    Ok(web::Json(advice.into()))
}
