use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        advert::{AdvertDto, CreateReviewDto, UpdateReviewDto},
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::rating::{AddRatingParam, EditRatingParam, RemoveRatingParam, ReviewInput},
        service::review::ReviewService,
        state::AppState,
        util::extract::{AppJson, IdPath},
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

/// Add a review to a note advert.
///
/// # Returns
/// - `200 OK` - The advert with the new review and recomputed average
/// - `400 Bad Request` - Invalid review or the advert is not a note
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - No such advert
#[utoipa::path(
    put,
    path = "/adverts/review/new/{advertId}",
    tag = REVIEW_TAG,
    params(("advertId" = i32, Path, description = "Advert id")),
    request_body = CreateReviewDto,
    responses(
        (status = 200, description = "Review added", body = AdvertDto),
        (status = 400, description = "Invalid review or advert type", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Advert not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_review(
    State(state): State<AppState>,
    IdPath(advert_id): IdPath,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let (body, value) = ReviewInput::required(payload.body, payload.value)?;

    let advert = ReviewService::new(&state.db)
        .add_rating(AddRatingParam {
            advert_id,
            author_id: user.id,
            body,
            value,
        })
        .await?;

    Ok((StatusCode::OK, Json(advert.into_dto())))
}

/// Edit one of the caller's reviews.
///
/// # Access Control
/// - The review's author
#[utoipa::path(
    put,
    path = "/adverts/review/update/{reviewId}",
    tag = REVIEW_TAG,
    params(("reviewId" = i32, Path, description = "Review id")),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review updated", body = AdvertDto),
        (status = 400, description = "Invalid review or permissions", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_review(
    State(state): State<AppState>,
    IdPath(rating_id): IdPath,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpdateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let input = ReviewInput::partial(payload.body, payload.value)?;

    let advert = ReviewService::new(&state.db)
        .edit_rating(EditRatingParam {
            rating_id,
            editor_id: user.id,
            body: input.body,
            value: input.value,
        })
        .await?;

    Ok((StatusCode::OK, Json(advert.into_dto())))
}

/// Remove one of the caller's reviews.
///
/// # Access Control
/// - The review's author
#[utoipa::path(
    put,
    path = "/adverts/review/remove/{reviewId}",
    tag = REVIEW_TAG,
    params(("reviewId" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review removed", body = AdvertDto),
        (status = 400, description = "Invalid permissions", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_review(
    State(state): State<AppState>,
    IdPath(rating_id): IdPath,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let advert = ReviewService::new(&state.db)
        .remove_rating(RemoveRatingParam {
            rating_id,
            actor_id: user.id,
        })
        .await?;

    Ok((StatusCode::OK, Json(advert.into_dto())))
}
