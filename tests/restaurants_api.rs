use actix_web::http::{header::LOCATION, StatusCode};
use actix_web::test::{self, TestRequest};
use serde_json::{json, Value};
use taco_tuesday::auth::TokenKeys;
use taco_tuesday::models::restaurant::Restaurant;
use taco_tuesday::models::review::Review;

mod common;
use common::Fixture;

async fn seed(fixture: &Fixture, name: &str) -> Restaurant {
    fixture
        .db
        .insert_restaurant(
            &Restaurant {
                name: name.into(),
                address: "1 Main St".into(),
                ..Default::default()
            },
            fixture.owner.id,
        )
        .await
        .unwrap()
}

#[actix_web::test]
async fn create_assigns_caller_as_owner() {
    let fixture = Fixture::new().await;
    let app = test_app!(fixture);

    let req = TestRequest::post()
        .uri("/api/Restaurants")
        .insert_header(fixture.bearer(fixture.owner.id))
        .set_json(json!({
            "name": "Taco Hut",
            "address": "1 Main St",
            "userId": fixture.stranger.id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap().to_string();

    let created: Restaurant = test::read_body_json(resp).await;
    assert!(created.id > 0);
    assert_eq!(created.user_id, fixture.owner.id);
    assert_eq!(location, format!("/api/Restaurants/{}", created.id));

    let stored = fixture.db.find_restaurant(created.id).await.unwrap().unwrap();
    assert_eq!(stored.user_id, fixture.owner.id);
}

#[actix_web::test]
async fn create_without_valid_token_is_unauthorized() {
    let fixture = Fixture::new().await;
    let app = test_app!(fixture);
    let body = json!({ "name": "Taco Hut", "address": "1 Main St" });

    let req = TestRequest::post()
        .uri("/api/Restaurants")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error, json!({ "status": 401, "errors": ["Not Authorized"] }));

    let forged = TokenKeys::new("not-the-server-secret")
        .issue(fixture.owner.id, 3600)
        .unwrap();
    let req = TestRequest::post()
        .uri("/api/Restaurants")
        .insert_header(("Authorization", format!("Bearer {forged}")))
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_reports_missing_required_fields() {
    let fixture = Fixture::new().await;
    let app = test_app!(fixture);

    let req = TestRequest::post()
        .uri("/api/Restaurants")
        .insert_header(fixture.bearer(fixture.owner.id))
        .set_json(json!({ "description": "No name, no address" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["errors"]["Name"][0], "You must provide a name.");
    assert_eq!(error["errors"]["Address"][0], "You must provide an address.");
}

#[actix_web::test]
async fn list_filters_by_name_ignoring_case() {
    let fixture = Fixture::new().await;
    for name in ["Taco Hut", "Burrito Barn", "taco town"] {
        seed(&fixture, name).await;
    }
    let app = test_app!(fixture);

    let req = TestRequest::get()
        .uri("/api/restaurants?filter=TACO")
        .to_request();
    let filtered: Vec<Restaurant> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<_> = filtered.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Taco Hut", "taco town"]);

    let req = TestRequest::get().uri("/api/Restaurants").to_request();
    let all: Vec<Restaurant> = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<_> = all.iter().map(|r| r.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(all.len(), 3);
    assert_eq!(ids, sorted);
}

#[actix_web::test]
async fn get_includes_reviews_with_authors() {
    let fixture = Fixture::new().await;
    let hut = seed(&fixture, "Taco Hut").await;
    fixture
        .db
        .insert_review(
            &Review {
                summary: "Great food, good prices.".into(),
                stars: 4,
                ..Review::draft(hut.id)
            },
            fixture.stranger.id,
        )
        .await
        .unwrap();
    let app = test_app!(fixture);

    let req = TestRequest::get()
        .uri(&format!("/api/Restaurants/{}", hut.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Taco Hut");
    assert_eq!(body["reviews"][0]["stars"], 4);
    assert_eq!(body["reviews"][0]["user"]["fullName"], "Steve Jobs");
    assert!(body["reviews"][0]["user"].get("hashedPassword").is_none());

    let req = TestRequest::get().uri("/api/Restaurants/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_enforces_ownership_and_matching_ids() {
    let fixture = Fixture::new().await;
    let hut = seed(&fixture, "Taco Hut").await;
    let app = test_app!(fixture);
    let uri = format!("/api/Restaurants/{}", hut.id);

    let edit = json!({
        "id": hut.id,
        "name": "Taco Hut Deluxe",
        "description": "Now with queso",
        "address": "2 Main St",
        "telephone": "555-0100",
        "userId": fixture.stranger.id
    });

    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(fixture.bearer(fixture.stranger.id))
        .set_json(&edit)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let mut mismatched = edit.clone();
    mismatched["id"] = json!(hut.id + 100);
    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(fixture.bearer(fixture.owner.id))
        .set_json(&mismatched)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(fixture.bearer(fixture.owner.id))
        .set_json(&edit)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Restaurant = test::read_body_json(resp).await;
    assert_eq!(updated.name, "Taco Hut Deluxe");
    assert_eq!(updated.telephone, "555-0100");
    assert_eq!(updated.user_id, fixture.owner.id);
}

#[actix_web::test]
async fn update_of_missing_restaurant_fails_ownership() {
    let fixture = Fixture::new().await;
    let app = test_app!(fixture);

    let req = TestRequest::put()
        .uri("/api/Restaurants/404")
        .insert_header(fixture.bearer(fixture.owner.id))
        .set_json(json!({ "id": 404, "name": "Ghost", "address": "Nowhere" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn delete_checks_existence_then_ownership() {
    let fixture = Fixture::new().await;
    let hut = seed(&fixture, "Taco Hut").await;
    let review = fixture
        .db
        .insert_review(&Review::draft(hut.id), fixture.stranger.id)
        .await
        .unwrap();
    let app = test_app!(fixture);
    let uri = format!("/api/Restaurants/{}", hut.id);

    let req = TestRequest::delete()
        .uri("/api/Restaurants/9999")
        .insert_header(fixture.bearer(fixture.owner.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::delete()
        .uri(&uri)
        .insert_header(fixture.bearer(fixture.stranger.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::delete()
        .uri(&uri)
        .insert_header(fixture.bearer(fixture.owner.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Restaurant = test::read_body_json(resp).await;
    assert_eq!(deleted.id, hut.id);

    assert!(!fixture.db.restaurant_exists(hut.id).await.unwrap());
    assert!(!fixture.db.review_exists(review.id).await.unwrap());
}

#[actix_web::test]
async fn malformed_json_is_a_validation_error() {
    let fixture = Fixture::new().await;
    let app = test_app!(fixture);

    let req = TestRequest::post()
        .uri("/api/Restaurants")
        .insert_header(fixture.bearer(fixture.owner.id))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["status"], 400);
    assert!(error["errors"]["$"].is_array());
}

#[actix_web::test]
async fn non_owner_with_invalid_body_is_unauthorized() {
    let fixture = Fixture::new().await;
    let hut = seed(&fixture, "Taco Hut").await;
    let app = test_app!(fixture);

    let req = TestRequest::put()
        .uri(&format!("/api/Restaurants/{}", hut.id))
        .insert_header(fixture.bearer(fixture.stranger.id))
        .set_json(json!({ "id": hut.id, "name": "", "address": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error, json!({ "status": 401, "errors": ["Not Authorized"] }));
}

#[actix_web::test]
async fn owner_with_invalid_body_gets_field_errors() {
    let fixture = Fixture::new().await;
    let hut = seed(&fixture, "Taco Hut").await;
    let app = test_app!(fixture);

    let req = TestRequest::put()
        .uri(&format!("/api/Restaurants/{}", hut.id))
        .insert_header(fixture.bearer(fixture.owner.id))
        .set_json(json!({ "id": hut.id, "name": "", "address": "1 Main St" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["errors"]["Name"][0], "You must provide a name.");
}

#[actix_web::test]
async fn create_accepts_null_optional_fields() {
    let fixture = Fixture::new().await;
    let app = test_app!(fixture);

    let req = TestRequest::post()
        .uri("/api/Restaurants")
        .insert_header(fixture.bearer(fixture.owner.id))
        .set_json(json!({
            "id": null,
            "name": "Taco Hut",
            "description": null,
            "address": "1 Main St",
            "telephone": null,
            "userId": null
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Restaurant = test::read_body_json(resp).await;
    assert_eq!(created.description, "");
    assert_eq!(created.user_id, fixture.owner.id);
}
