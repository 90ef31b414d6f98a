//! Registration handlers for human users and services.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderName, StatusCode};
use axum::http::header::SET_COOKIE;

use gatekeeper_service::client::{NewService, NewUser};

use crate::dto::request::{RegisterServiceRequest, RegisterUserRequest};
use crate::dto::response::{ApiResponse, ClientResponse, ServiceRegistrationResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /register-user
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClientResponse>>), ApiError> {
    let client = state
        .clients
        .register_user(NewUser {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            groups: req.groups,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully",
            ClientResponse::from(&client),
        )),
    ))
}

/// POST /register-service
///
/// The non-expiring token is returned in the body and also set as a
/// session cookie.
pub async fn register_service(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterServiceRequest>,
) -> Result<
    (
        StatusCode,
        [(HeaderName, String); 1],
        Json<ApiResponse<ServiceRegistrationResponse>>,
    ),
    ApiError,
> {
    let registration = state
        .clients
        .register_service(NewService {
            email: req.email,
            name: req.name,
            groups: req.groups,
        })
        .await?;

    let cookie = state.cookie.issue(&registration.token);
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::ok(
            "Service registered successfully",
            ServiceRegistrationResponse {
                client: ClientResponse::from(&registration.client),
                service_token: registration.token.token,
            },
        )),
    ))
}
