use super::*;

/// Tests inserting a rating and reading back the advert's values.
///
/// Expected: Ok with the new value included
#[tokio::test]
async fn creates_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, advert, _) = factory::helpers::create_rated_note(db, &[2]).await?;
    let reviewer = factory::create_user(db).await?;

    let repo = RatingRepository::new(db);
    let rating = repo
        .create(AddRatingParam {
            advert_id: advert.id,
            author_id: reviewer.id,
            body: "Clear and complete".to_string(),
            value: 4,
        })
        .await?;

    assert_eq!(rating.advert_id, advert.id);
    assert_eq!(rating.author_id, reviewer.id);
    assert_eq!(rating.body, "Clear and complete");

    let mut values = repo.values_for_advert(advert.id).await?;
    values.sort();
    assert_eq!(values, vec![2, 4]);

    Ok(())
}
