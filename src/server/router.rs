use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        advert::{
            AdvertDto, AdvertFormDto, AdvertListDto, CreateReviewDto, HomepageDto, RatingDto,
            ReviewsDto, SendEmailDto, SortDirectionDto, UpdateReviewDto,
        },
        api::{ErrorDto, FieldErrorDto, MessageDto, TokenDto},
        user::{
            LoginUserDto, ProfileDto, RegisterUserDto, UpdatedUserDto, UserDto, UserFormDto,
            UserListDto, UserWithAdvertsDto,
        },
    },
    server::{
        controller::{
            advert::{self, ADVERT_TAG},
            auth::{self, AUTH_TAG},
            notification::{self, NOTIFICATION_TAG},
            review::{self, REVIEW_TAG},
            user::{self, USER_TAG},
        },
        service::media::IMAGES_DIR,
        state::AppState,
    },
};

/// Largest accepted request body, enough for one image upload plus form fields.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "notemart", description = "Student marketplace for notes and textbooks"),
    paths(
        advert::get_all_adverts,
        advert::get_all_books,
        advert::get_all_notes,
        advert::get_homepage,
        advert::search_adverts,
        advert::get_single_advert,
        advert::get_by_type_and_module,
        advert::create_advert,
        advert::update_advert,
        advert::delete_advert,
        review::add_review,
        review::update_review,
        review::remove_review,
        notification::send_email,
        user::get_all_users,
        user::get_current_user,
        user::get_profile,
        user::update_user,
        user::delete_user,
        auth::register,
        auth::login,
    ),
    components(schemas(
        AdvertDto,
        AdvertFormDto,
        AdvertListDto,
        CreateReviewDto,
        ErrorDto,
        FieldErrorDto,
        HomepageDto,
        LoginUserDto,
        MessageDto,
        ProfileDto,
        RatingDto,
        RegisterUserDto,
        ReviewsDto,
        SendEmailDto,
        SortDirectionDto,
        TokenDto,
        UpdateReviewDto,
        UpdatedUserDto,
        UserDto,
        UserFormDto,
        UserListDto,
        UserWithAdvertsDto,
    )),
    tags(
        (name = ADVERT_TAG, description = "Advert catalogue"),
        (name = REVIEW_TAG, description = "Reviews of note adverts"),
        (name = NOTIFICATION_TAG, description = "Buyer-interest email"),
        (name = USER_TAG, description = "User profiles"),
        (name = AUTH_TAG, description = "Registration and login"),
    )
)]
pub struct ApiDoc;

/// Builds the application router.
///
/// # Arguments
/// - `state` - Shared application state; its media store decides where `/Images` is
///   served from
pub fn router(state: AppState) -> Router {
    let images = ServeDir::new(state.media.images_dir());

    // Collection routes also answer with a trailing slash.
    Router::new()
        .route("/adverts", post(advert::create_advert))
        .route("/adverts/", post(advert::create_advert))
        .route("/adverts/all", get(advert::get_all_adverts))
        .route("/adverts/allbooks", get(advert::get_all_books))
        .route("/adverts/allnotes", get(advert::get_all_notes))
        .route("/adverts/homepage", get(advert::get_homepage))
        .route("/adverts/search/{text}", get(advert::search_adverts))
        .route(
            "/adverts/singleadvert/{id}",
            get(advert::get_single_advert),
        )
        .route("/adverts/sendemail", post(notification::send_email))
        .route("/adverts/review/new/{id}", put(review::add_review))
        .route("/adverts/review/update/{id}", put(review::update_review))
        .route("/adverts/review/remove/{id}", put(review::remove_review))
        .route(
            "/adverts/{id}",
            put(advert::update_advert).delete(advert::delete_advert),
        )
        // Path parameters at one position must share a name, hence `{id}` for the type.
        .route(
            "/adverts/{id}/{module_id}",
            get(advert::get_by_type_and_module),
        )
        .route("/users", get(user::get_current_user))
        .route("/users/", get(user::get_current_user))
        .route("/users/all", get(user::get_all_users))
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .route("/users/profile/{id}", get(user::get_profile))
        .route(
            "/users/{id}",
            put(user::update_user).delete(user::delete_user),
        )
        .nest_service(&format!("/{}", IMAGES_DIR), images)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorDto::new("Route not found")))
}
