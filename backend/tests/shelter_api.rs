//! End-to-end shelter directory flows over the in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use support::{app, memory_state, register_and_login, send, shelter};

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("shelter id").to_owned()
}

#[actix_web::test]
async fn crud_round_trip() {
    let app = test::init_service(app(memory_state())).await;
    let bearer = register_and_login(&app, "warden").await;

    let (status, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/shelters")
            .insert_header(bearer.clone())
            .set_json(shelter("  City Hall B2  ", 37.5663, 126.9779, 350))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "City Hall B2");
    let id = id_of(&created);
    let uri = format!("/api/v1/shelters/{id}");

    let (status, fetched) = send(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, patched) = send(
        &app,
        test::TestRequest::patch()
            .uri(&uri)
            .insert_header(bearer.clone())
            .set_json(json!({"capacity": 500, "contact": ""}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["capacity"], 500);
    assert_eq!(patched["name"], "City Hall B2");
    assert_eq!(patched["contact"], Value::Null);
    assert_eq!(patched["createdAt"], created["createdAt"]);

    let (status, replaced) = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer.clone())
            .set_json(json!({
                "name": "Civic Centre",
                "address": "1 Plaza",
                "latitude": 37.57,
                "longitude": 126.98,
                "capacity": 80,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], id.as_str());
    assert_eq!(replaced["name"], "Civic Centre");
    assert_eq!(replaced["type"], Value::Null);

    let (status, body) = send(
        &app,
        test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!({"name": "   "}), "name")]
#[case(json!({"latitude": 120.0}), "latitude")]
#[case(json!({"address": ""}), "address")]
#[case(json!({"capacity": 3_000_000_000_u64}), "capacity")]
#[actix_web::test]
async fn invalid_create_persists_nothing(#[case] overrides: Value, #[case] field: &str) {
    let app = test::init_service(app(memory_state())).await;
    let bearer = register_and_login(&app, "warden").await;
    let mut body = shelter("Alpha", 37.5, 126.9, 10);
    for (key, value) in overrides.as_object().expect("object") {
        body[key] = value.clone();
    }

    let (status, error) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/shelters")
            .insert_header(bearer)
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["field"], field);

    let (_, listed) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/shelters").to_request(),
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn writes_require_authentication() {
    let app = test::init_service(app(memory_state())).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/shelters")
            .set_json(shelter("Alpha", 37.5, 126.9, 10))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn list_is_ordered_by_name() {
    let app = test::init_service(app(memory_state())).await;
    let bearer = register_and_login(&app, "warden").await;
    for name in ["Gamma", "Alpha", "Beta"] {
        let (status, _) = send(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/shelters")
                .insert_header(bearer.clone())
                .set_json(shelter(name, 37.5, 126.9, 10))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, listed) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/shelters").to_request(),
    )
    .await;
    let names: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
}

#[actix_web::test]
async fn nearby_orders_by_distance_and_applies_filters() {
    let app = test::init_service(app(memory_state())).await;
    let bearer = register_and_login(&app, "warden").await;
    let fixtures = [
        ("Far", 37.5800, 126.9780, 500),
        ("Near", 37.5665, 126.9781, 200),
        ("Small", 37.5664, 126.9780, 5),
        ("Elsewhere", 35.1796, 129.0756, 900),
    ];
    for (name, lat, lng, capacity) in fixtures {
        let (status, _) = send(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/shelters")
                .insert_header(bearer.clone())
                .set_json(shelter(name, lat, lng, capacity))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, results) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/shelters/nearby?lat=37.5663&lng=126.9779&maxDistance=5000&minCapacity=100")
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = results.as_array().expect("array");
    let names: Vec<&str> = items.iter().filter_map(|item| item["name"].as_str()).collect();
    assert_eq!(names, ["Near", "Far"]);
    let first = items[0]["distanceMeters"].as_f64().expect("distance");
    let second = items[1]["distanceMeters"].as_f64().expect("distance");
    assert!(first < second);
    assert!(second < 5000.0);
}

#[actix_web::test]
async fn nearby_rejects_invalid_coordinates() {
    let app = test::init_service(app(memory_state())).await;

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/shelters/nearby?lat=95&lng=0")
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "lat");
    assert_eq!(body["details"]["code"], "out_of_range");
}
