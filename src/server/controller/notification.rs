use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        advert::SendEmailDto,
        api::{ErrorDto, MessageDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::notification::BuyerInterestParam,
        state::AppState, util::extract::AppJson,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

/// Email the seller of an advert on behalf of the caller.
///
/// The email is sent in the background. The response does not depend on whether
/// delivery succeeds.
///
/// # Returns
/// - `200 OK` - Email queued
/// - `400 Bad Request` - Invalid fields
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    post,
    path = "/adverts/sendemail",
    tag = NOTIFICATION_TAG,
    request_body = SendEmailDto,
    responses(
        (status = 200, description = "Email queued", body = MessageDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn send_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<SendEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    state
        .mailer
        .notify_buyer_interest(BuyerInterestParam::from_dto(payload, &user));

    Ok((StatusCode::OK, Json(MessageDto::new("Email sent"))))
}
