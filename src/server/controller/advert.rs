use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        advert::{
            AdvertDto, AdvertFormDto, AdvertListDto, AdvertListQuery, HomepageDto,
            SortDirectionDto,
        },
        api::{ErrorDto, MessageDto},
    },
    server::{
        error::{validation::FieldErrors, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::advert::{
            Advert, AdvertCategory, AdvertChanges, AdvertListParam, AdvertSortKey,
            CreateAdvertParam, SortDirection,
        },
        service::advert::AdvertService,
        state::AppState,
        util::{
            extract::{AppQuery, IdPath},
            upload::UploadForm,
        },
    },
};

/// Tag for grouping advert endpoints in OpenAPI documentation
pub static ADVERT_TAG: &str = "advert";

fn list_dto(adverts: Vec<Advert>) -> AdvertListDto {
    AdvertListDto::new(adverts.into_iter().map(Advert::into_dto).collect())
}

fn parse_category(value: &str) -> Result<AdvertCategory, AppError> {
    value
        .parse()
        .map_err(|()| FieldErrors::single("type", "Type must be either note or book").into())
}

impl From<SortDirectionDto> for SortDirection {
    fn from(dto: SortDirectionDto) -> Self {
        match dto {
            SortDirectionDto::Asc => SortDirection::Asc,
            SortDirectionDto::Desc => SortDirection::Desc,
        }
    }
}

/// Get every advert.
///
/// Optional query parameters sort by `price` and/or `ratings` (`asc` or `desc`, price
/// first when both are given) and filter by `type`. Other sort values are ignored.
///
/// # Access Control
/// - `Admin` - Only admins can list every advert
///
/// # Returns
/// - `200 OK` - Count and adverts
/// - `400 Bad Request` - Caller is not an admin or unknown type
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/adverts/all",
    tag = ADVERT_TAG,
    params(
        ("price" = Option<SortDirectionDto>, Query, description = "Sort by price"),
        ("ratings" = Option<SortDirectionDto>, Query, description = "Sort by average rating"),
        ("type" = Option<String>, Query, description = "note or book")
    ),
    responses(
        (status = 200, description = "All adverts", body = AdvertListDto),
        (status = 400, description = "Caller is not an admin or invalid query", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_adverts(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<AdvertListQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let category = query.category.as_deref().map(parse_category).transpose()?;

    let mut sort = Vec::new();
    if let Some(direction) = query.price.as_deref().and_then(SortDirectionDto::from_query) {
        sort.push((AdvertSortKey::Price, direction.into()));
    }
    if let Some(direction) = query.ratings.as_deref().and_then(SortDirectionDto::from_query) {
        sort.push((AdvertSortKey::AverageRating, direction.into()));
    }

    let adverts = AdvertService::new(&state.db, &state.media)
        .list(AdvertListParam {
            category,
            sort,
            ..Default::default()
        })
        .await?;

    Ok((StatusCode::OK, Json(list_dto(adverts))))
}

/// Get every book, most expensive first.
#[utoipa::path(
    get,
    path = "/adverts/allbooks",
    tag = ADVERT_TAG,
    responses(
        (status = 200, description = "All books", body = AdvertListDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_books(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let adverts = AdvertService::new(&state.db, &state.media)
        .list_by_category(AdvertCategory::Book)
        .await?;

    Ok((StatusCode::OK, Json(list_dto(adverts))))
}

/// Get every note, most expensive first.
#[utoipa::path(
    get,
    path = "/adverts/allnotes",
    tag = ADVERT_TAG,
    responses(
        (status = 200, description = "All notes", body = AdvertListDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_notes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let adverts = AdvertService::new(&state.db, &state.media)
        .list_by_category(AdvertCategory::Note)
        .await?;

    Ok((StatusCode::OK, Json(list_dto(adverts))))
}

/// Get the homepage sections.
///
/// Returns the four best rated notes (unrated last) and the four newest books and notes.
#[utoipa::path(
    get,
    path = "/adverts/homepage",
    tag = ADVERT_TAG,
    responses(
        (status = 200, description = "Homepage sections", body = HomepageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_homepage(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let homepage = AdvertService::new(&state.db, &state.media)
        .homepage()
        .await?;

    Ok((StatusCode::OK, Json(homepage.into_dto())))
}

/// Search adverts by exact module code.
#[utoipa::path(
    get,
    path = "/adverts/search/{text}",
    tag = ADVERT_TAG,
    params(("text" = String, Path, description = "Module code")),
    responses(
        (status = 200, description = "Matching adverts", body = AdvertListDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_adverts(
    State(state): State<AppState>,
    Path(text): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let adverts = AdvertService::new(&state.db, &state.media)
        .search_by_module(text.trim())
        .await?;

    Ok((StatusCode::OK, Json(list_dto(adverts))))
}

/// Get one advert with the usernames of its creator and reviewers.
///
/// # Returns
/// - `200 OK` - The advert
/// - `404 Not Found` - No such advert
#[utoipa::path(
    get,
    path = "/adverts/singleadvert/{id}",
    tag = ADVERT_TAG,
    params(("id" = i32, Path, description = "Advert id")),
    responses(
        (status = 200, description = "The advert", body = AdvertDto),
        (status = 404, description = "Advert not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_single_advert(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let detail = AdvertService::new(&state.db, &state.media)
        .get_detail(id)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Get adverts of one type for one module code.
///
/// # Access Control
/// - `Admin` - Only admins can use this listing
#[utoipa::path(
    get,
    path = "/adverts/{type}/{subjectCode}",
    tag = ADVERT_TAG,
    params(
        ("type" = String, Path, description = "note or book"),
        ("subjectCode" = String, Path, description = "Module code")
    ),
    responses(
        (status = 200, description = "Matching adverts", body = AdvertListDto),
        (status = 400, description = "Caller is not an admin or unknown type", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_by_type_and_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((category, module_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let category = parse_category(&category)?;

    let adverts = AdvertService::new(&state.db, &state.media)
        .list_by_category_and_module(category, module_id.trim())
        .await?;

    Ok((StatusCode::OK, Json(list_dto(adverts))))
}

/// Create an advert owned by the caller.
///
/// Accepts multipart form data (with an optional `imageUrl` file) or a JSON object.
///
/// # Returns
/// - `201 Created` - The new advert
/// - `400 Bad Request` - Missing or invalid fields
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    post,
    path = "/adverts",
    tag = ADVERT_TAG,
    request_body(content = AdvertFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Advert created", body = AdvertDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_advert(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut form: UploadForm,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let image = form.take_image();
    let changes = AdvertChanges::from_form(&form)?;
    let param = CreateAdvertParam::from_changes(user.id, changes)?;

    let advert = AdvertService::new(&state.db, &state.media)
        .create(param, image)
        .await?;

    Ok((StatusCode::CREATED, Json(advert.into_dto())))
}

/// Update an advert owned by the caller.
///
/// Only supplied fields change. A newly uploaded image replaces the previous one.
///
/// # Access Control
/// - The advert's creator; admins get no override
///
/// # Returns
/// - `200 OK` - The updated advert
/// - `400 Bad Request` - Invalid fields or caller is not the owner
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - No such advert
#[utoipa::path(
    put,
    path = "/adverts/{id}",
    tag = ADVERT_TAG,
    params(("id" = i32, Path, description = "Advert id")),
    request_body(content = AdvertFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Advert updated", body = AdvertDto),
        (status = 400, description = "Invalid input or permissions", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Advert not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_advert(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    mut form: UploadForm,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let image = form.take_image();
    let changes = AdvertChanges::from_form(&form)?;

    let advert = AdvertService::new(&state.db, &state.media)
        .update(&user, id, changes, image)
        .await?;

    Ok((StatusCode::OK, Json(advert.into_dto())))
}

/// Delete an advert with its reviews and image.
///
/// # Access Control
/// - The advert's creator or any admin
///
/// # Returns
/// - `200 OK` - Advert deleted
/// - `400 Bad Request` - Caller is neither owner nor admin
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - No such advert
#[utoipa::path(
    delete,
    path = "/adverts/{id}",
    tag = ADVERT_TAG,
    params(("id" = i32, Path, description = "Advert id")),
    responses(
        (status = 200, description = "Advert deleted", body = MessageDto),
        (status = 400, description = "Invalid permissions", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Advert not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_advert(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AdvertService::new(&state.db, &state.media)
        .delete(&user, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Advert successfully deleted")),
    ))
}
