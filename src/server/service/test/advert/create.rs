use super::*;

/// Tests creating an advert with an image.
///
/// Verifies that the image is written below the upload root and referenced by a path
/// relative to it.
///
/// Expected: Ok with a stored image and no reviews
#[tokio::test]
async fn stores_image_and_creates_advert() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let seller = factory::create_user(db).await?;

    let advert = AdvertService::new(db, &media)
        .create(
            CreateAdvertParam {
                creator_id: seller.id,
                category: AdvertCategory::Book,
                module_id: "CS2001".to_string(),
                title: "Algorithms".to_string(),
                description: "Hardback, lightly used".to_string(),
                price: 30.0,
                image_url: None,
            },
            Some(png("cover.png")),
        )
        .await?;

    assert_eq!(advert.creator_id, seller.id);
    assert_eq!(advert.category, AdvertCategory::Book);
    assert!(advert.ratings.is_empty());
    assert!(advert.average_rating.is_none());

    let image_url = advert.image_url.unwrap();
    assert!(image_url.starts_with("Images/adverts/"));
    assert!(image_url.ends_with("--cover.png"));
    assert!(uploads.path().join(&image_url).exists());

    Ok(())
}

/// Tests building create parameters from incomplete changes.
///
/// Expected: Err listing every missing field
#[test]
fn create_param_requires_every_field() {
    let changes = AdvertChanges {
        title: Some("Notes".to_string()),
        ..Default::default()
    };

    let errors = CreateAdvertParam::from_changes(1, changes).unwrap_err();
    let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();

    assert_eq!(fields, vec!["type", "moduleId", "description", "price"]);
}
