use super::*;

/// Tests adding a review to a rated note.
///
/// Verifies that the average is recomputed from the full set: ratings [5, 3] plus a
/// new 4 give 4.0.
///
/// Expected: Ok with three ratings and average 4.0
#[tokio::test]
async fn recomputes_average_from_full_set() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, advert, _) = factory::helpers::create_rated_note(db, &[5, 3]).await?;
    let reviewer = factory::create_user(db).await?;

    let service = ReviewService::new(db);
    let updated = service
        .add_rating(AddRatingParam {
            advert_id: advert.id,
            author_id: reviewer.id,
            body: "Solid notes".to_string(),
            value: 4,
        })
        .await?;

    assert_eq!(updated.ratings.len(), 3);
    assert_eq!(updated.average_rating, Some(4.0));
    let added = updated.ratings.last().unwrap();
    assert_eq!(added.author_id, reviewer.id);
    assert_eq!(added.body, "Solid notes");

    Ok(())
}

/// Tests the first review on an unrated note.
///
/// Expected: Ok with average equal to the single value
#[tokio::test]
async fn first_review_sets_average() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, advert) = factory::helpers::create_note_with_creator(db).await?;
    let reviewer = factory::create_user(db).await?;

    let updated = ReviewService::new(db)
        .add_rating(AddRatingParam {
            advert_id: advert.id,
            author_id: reviewer.id,
            body: "  Great  ".to_string(),
            value: 2,
        })
        .await?;

    assert_eq!(updated.average_rating, Some(2.0));
    assert_eq!(updated.ratings[0].body, "Great");

    Ok(())
}

/// Tests that books cannot be reviewed.
///
/// Expected: Err(AppError::InvalidCategory) with no rating stored
#[tokio::test]
async fn rejects_book_adverts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seller = factory::create_user(db).await?;
    let book = factory::create_book(db, seller.id).await?;
    let reviewer = factory::create_user(db).await?;

    let result = ReviewService::new(db)
        .add_rating(AddRatingParam {
            advert_id: book.id,
            author_id: reviewer.id,
            body: "Nice".to_string(),
            value: 5,
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidCategory)));

    let (stored, ratings) = AdvertRepository::new(db)
        .find_with_ratings(book.id)
        .await?
        .unwrap();
    assert!(ratings.is_empty());
    assert!(stored.average_rating.is_none());

    Ok(())
}

/// Tests reviewing a missing advert.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_for_missing_advert() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reviewer = factory::create_user(db).await?;

    let result = ReviewService::new(db)
        .add_rating(AddRatingParam {
            advert_id: 404,
            author_id: reviewer.id,
            body: "Nice".to_string(),
            value: 5,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests input validation of body and value.
///
/// Expected: Err(AppError::Validation) naming both fields, with nothing stored
#[tokio::test]
async fn rejects_blank_body_and_out_of_range_value() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, advert, _) = factory::helpers::create_rated_note(db, &[3]).await?;
    let reviewer = factory::create_user(db).await?;

    let result = ReviewService::new(db)
        .add_rating(AddRatingParam {
            advert_id: advert.id,
            author_id: reviewer.id,
            body: "   ".to_string(),
            value: 6,
        })
        .await;

    match result {
        Err(AppError::Validation(errors)) => {
            let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["body", "value"]);
        }
        other => panic!("Expected Validation error, got: {:?}", other),
    }

    let (stored, ratings) = AdvertRepository::new(db)
        .find_with_ratings(advert.id)
        .await?
        .unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(stored.average_rating, Some(3.0));

    Ok(())
}

/// Tests that the category check runs before input validation.
///
/// Expected: Err(AppError::InvalidCategory) even with invalid input
#[tokio::test]
async fn category_check_precedes_validation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seller = factory::create_user(db).await?;
    let book = factory::create_book(db, seller.id).await?;

    let result = ReviewService::new(db)
        .add_rating(AddRatingParam {
            advert_id: book.id,
            author_id: seller.id,
            body: String::new(),
            value: 0,
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidCategory)));

    Ok(())
}

/// Tests that a denied write does not hide behind an auth error.
///
/// Verifies that the error type for a wrong category is not an authorization error.
///
/// Expected: not Err(AppError::AuthErr)
#[tokio::test]
async fn invalid_category_is_not_a_permission_error() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let seller = factory::create_user(db).await?;
    let book = factory::create_book(db, seller.id).await?;

    let result = ReviewService::new(db)
        .add_rating(AddRatingParam {
            advert_id: book.id,
            author_id: seller.id,
            body: "Self review".to_string(),
            value: 5,
        })
        .await;

    assert!(!matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidPermissions { .. }))
    ));

    Ok(())
}
