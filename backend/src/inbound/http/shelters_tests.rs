//! Handler tests for the shelter endpoints.

use super::*;
use crate::domain::ports::{MockShelterCommand, MockShelterQuery};
use crate::domain::{ShelterDraft, ShelterId};
use crate::inbound::http::test_utils::{MockPorts, bearer, test_app};
use crate::test_support::{fixed_now, sample_shelter_fields};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn stored(name: &str) -> Shelter {
    let draft = ShelterDraft::try_from(sample_shelter_fields(name)).expect("valid fixture");
    Shelter::create(draft, fixed_now())
}

async fn send(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        test_app(ports.into_state()).service(
            web::scope("/api/v1")
                .service(list_shelters)
                .service(nearby_shelters)
                .service(get_shelter)
                .service(create_shelter)
                .service(replace_shelter)
                .service(patch_shelter)
                .service(delete_shelter),
        ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn full_body() -> Value {
    json!({
        "name": "Seoul City Hall B2",
        "address": "110 Sejong-daero",
        "latitude": 37.5663,
        "longitude": 126.9779,
        "capacity": 350,
        "type": "underground",
        "contact": "02-120",
    })
}

#[actix_web::test]
async fn list_is_public_and_camel_cased() {
    let mut query = MockShelterQuery::new();
    query
        .expect_list()
        .returning(|| Ok(vec![stored("Alpha"), stored("Beta")]));

    let (status, body) = send(
        MockPorts {
            shelters_query: query,
            ..MockPorts::default()
        },
        actix_test::TestRequest::get().uri("/api/v1/shelters"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Alpha");
    assert!(items[0].get("createdAt").is_some());
    assert!(items[0].get("created_at").is_none());
    assert!(items[0].get("type").is_some());
}

#[actix_web::test]
async fn get_rejects_non_uuid_id() {
    let (status, body) = send(
        MockPorts::default(),
        actix_test::TestRequest::get().uri("/api/v1/shelters/not-a-uuid"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

#[actix_web::test]
async fn get_maps_missing_to_not_found() {
    let mut query = MockShelterQuery::new();
    query
        .expect_get()
        .returning(|_| Err(Error::not_found("shelter not found")));

    let (status, body) = send(
        MockPorts {
            shelters_query: query,
            ..MockPorts::default()
        },
        actix_test::TestRequest::get().uri(&format!("/api/v1/shelters/{}", ShelterId::random())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn nearby_is_routed_before_id_lookup() {
    let mut query = MockShelterQuery::new();
    query
        .expect_nearby()
        .withf(|q| {
            q.limit() == 3
                && q.max_distance_meters() == 1500.0
                && q.min_capacity() == Some(100)
                && q.shelter_types() == ["underground".to_owned(), "school".to_owned()]
        })
        .returning(|_| {
            Ok(vec![NearbyShelter {
                shelter: stored("Alpha"),
                distance_meters: 12.5,
            }])
        });

    let (status, body) = send(
        MockPorts {
            shelters_query: query,
            ..MockPorts::default()
        },
        actix_test::TestRequest::get().uri(
            "/api/v1/shelters/nearby?lat=37.5&lng=126.9&maxDistance=1500&limit=3&minCapacity=100&type=Underground,%20school",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Alpha");
    assert_eq!(body[0]["distanceMeters"], 12.5);
}

#[rstest]
#[case("lat=91&lng=0", "lat")]
#[case("lat=0&lng=181", "lng")]
#[case("lat=0&lng=0&maxDistance=0", "maxDistance")]
#[actix_web::test]
async fn nearby_rejects_out_of_range_parameters(#[case] query: &str, #[case] field: &str) {
    let (status, body) = send(
        MockPorts::default(),
        actix_test::TestRequest::get().uri(&format!("/api/v1/shelters/nearby?{query}")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], "out_of_range");
}

#[actix_web::test]
async fn create_requires_bearer_token() {
    let (status, _) = send(
        MockPorts::default(),
        actix_test::TestRequest::post()
            .uri("/api/v1/shelters")
            .set_json(full_body()),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_returns_created_shelter() {
    let mut command = MockShelterCommand::new();
    command
        .expect_create()
        .withf(|fields| fields.name == "Seoul City Hall B2" && fields.capacity == 350)
        .times(1)
        .returning(|fields| {
            let draft = ShelterDraft::try_from(fields).expect("valid");
            Ok(Shelter::create(draft, fixed_now()))
        });

    let (status, body) = send(
        MockPorts {
            shelters: command,
            ..MockPorts::authenticating("nora")
        },
        actix_test::TestRequest::post()
            .uri("/api/v1/shelters")
            .insert_header(bearer())
            .set_json(full_body()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Seoul City Hall B2");
    assert_eq!(body["type"], "underground");
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[rstest]
#[case("name")]
#[case("latitude")]
#[case("capacity")]
#[actix_web::test]
async fn create_names_missing_field(#[case] field: &str) {
    let mut body = full_body();
    body.as_object_mut().expect("object").remove(field);
    let mut command = MockShelterCommand::new();
    command.expect_create().never();

    let (status, payload) = send(
        MockPorts {
            shelters: command,
            ..MockPorts::authenticating("nora")
        },
        actix_test::TestRequest::post()
            .uri("/api/v1/shelters")
            .insert_header(bearer())
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["field"], field);
    assert_eq!(payload["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn patch_forwards_only_supplied_fields() {
    let mut command = MockShelterCommand::new();
    command
        .expect_patch()
        .withf(|_, patch| {
            *patch
                == ShelterPatch {
                    capacity: Some(500),
                    contact: Some(String::new()),
                    ..ShelterPatch::default()
                }
        })
        .returning(|_, _| Ok(stored("Alpha")));

    let (status, _) = send(
        MockPorts {
            shelters: command,
            ..MockPorts::authenticating("nora")
        },
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/shelters/{}", ShelterId::random()))
            .insert_header(bearer())
            .set_json(json!({"capacity": 500, "contact": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn replace_propagates_validation_error() {
    let mut command = MockShelterCommand::new();
    command.expect_replace().returning(|_, _| {
        Err(Error::invalid_request("name must not be blank")
            .with_details(json!({"field": "name", "code": "blank"})))
    });
    let mut body = full_body();
    body["name"] = json!("   ");

    let (status, payload) = send(
        MockPorts {
            shelters: command,
            ..MockPorts::authenticating("nora")
        },
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/shelters/{}", ShelterId::random()))
            .insert_header(bearer())
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["code"], "blank");
}

#[actix_web::test]
async fn delete_returns_no_content() {
    let id = ShelterId::random();
    let mut command = MockShelterCommand::new();
    command
        .expect_delete()
        .withf(move |candidate| *candidate == id)
        .times(1)
        .returning(|_| Ok(()));

    let (status, body) = send(
        MockPorts {
            shelters: command,
            ..MockPorts::authenticating("nora")
        },
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/shelters/{id}"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}
