//! REST store backend against a mock table-store server

use serde_json::{json, Map, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dugout::store::{Filter, Order, Query, RecordStore, RestStore, StoreError};

fn obj(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn insert_returns_created_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Pitches"))
        .and(header("Prefer", "return=representation"))
        .and(header("apikey", "secret"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"PitchID": 7, "AtBatID": 1, "PitchNo": 3}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), Some("secret".to_string())).unwrap();
    let created = store
        .insert("Pitches", obj(json!({"AtBatID": 1, "PitchNo": 3})))
        .await
        .unwrap();
    assert_eq!(created.get("PitchID"), Some(&json!(7)));
}

#[tokio::test]
async fn empty_insert_response_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Pitches"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), None).unwrap();
    let err = store
        .insert("Pitches", obj(json!({"AtBatID": 1})))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::EmptyInsert(table) if table == "Pitches"));
}

#[tokio::test]
async fn select_encodes_filters_order_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Pitches"))
        .and(query_param("AtBatID", "eq.12"))
        .and(query_param("order", "PitchOfAB.desc"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"PitchID": 9, "AtBatID": 12, "PitchOfAB": 4, "Balls": 2, "Strikes": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), None).unwrap();
    let rows = store
        .select(
            "Pitches",
            Query::new()
                .filter(Filter::eq("AtBatID", 12))
                .order_by(Order::desc("PitchOfAB"))
                .limit(1),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("PitchOfAB"), Some(&json!(4)));
}

#[tokio::test]
async fn update_patches_by_filter() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/AtBats"))
        .and(query_param("AtBatID", "eq.5"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"AtBatID": 5, "PlayResult": "2B", "RunsScored": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), None).unwrap();
    let updated = store
        .update(
            "AtBats",
            &[Filter::eq("AtBatID", 5)],
            obj(json!({"PlayResult": "2B", "RunsScored": 1})),
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].get("PlayResult"), Some(&json!("2B")));
}

#[tokio::test]
async fn delete_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/Pitches"))
        .and(query_param("PitchID", "eq.9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), None).unwrap();
    store
        .delete("Pitches", &[Filter::eq("PitchID", 9)])
        .await
        .unwrap();
}

#[tokio::test]
async fn server_errors_surface_with_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Pitches"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), None).unwrap();
    let err = store.select("Pitches", Query::new()).await.unwrap_err();
    match err {
        StoreError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}
