//! Batch and schema helper tests against a mock Directus server.

mod common;

use common::{bodies_to, envelope, field, requests_to, static_client};
use directus::error::{InvalidInputError, NotFoundError, ValidationError};
use directus::{DirectusClient, Error, RelationDescriptor, RetryPolicy};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn items(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"name": format!("item-{i}"), "comments": "bulk"}))
        .collect()
}

async fn mount_fields(server: &MockServer, collection: &str, fields: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/fields/{collection}")))
        .respond_with(envelope(fields))
        .mount(server)
        .await;
}

// ============================================================================
// bulk_insert
// ============================================================================

#[tokio::test]
async fn test_bulk_insert_250_items_in_three_chunks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items/test_collection"))
        .respond_with(envelope(json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let input = items(250);
    client.bulk_insert("test_collection", &input).await.unwrap();

    let bodies = bodies_to(&server, "POST", "/items/test_collection").await;
    let sizes: Vec<usize> = bodies
        .iter()
        .map(|b| b.as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);

    // Every item exactly once, in the original order.
    let sent: Vec<Value> = bodies
        .into_iter()
        .flat_map(|b| b.as_array().unwrap().clone())
        .collect();
    assert_eq!(sent, input);
}

#[tokio::test]
async fn test_bulk_insert_chunk_counts() {
    let cases: [(usize, usize, u64); 5] = [
        (0, 100, 0),
        (1, 100, 1),
        (100, 100, 1),
        (101, 100, 2),
        (10, 3, 4),
    ];
    for (n, chunk, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items/articles"))
            .respond_with(envelope(json!([])))
            .expect(expected)
            .mount(&server)
            .await;

        let client = static_client(&server).await;
        client
            .bulk_insert_chunked("articles", &items(n), chunk)
            .await
            .unwrap();

        for body in bodies_to(&server, "POST", "/items/articles").await {
            assert!(body.as_array().unwrap().len() <= chunk);
        }
    }
}

#[tokio::test]
async fn test_bulk_insert_stops_at_failing_chunk() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items/articles"))
        .respond_with(envelope(json!([])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/items/articles"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{"message": "Value for field \"name\" is too long."}]
        })))
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let err = client.bulk_insert("articles", &items(300)).await.unwrap_err();

    assert_eq!(err.as_api().unwrap().status, 400);
    // First chunk committed, second rejected, third never sent.
    assert_eq!(requests_to(&server, "POST", "/items/articles").await.len(), 2);
}

#[tokio::test]
async fn test_bulk_insert_rejects_zero_chunk_size() {
    let server = MockServer::start().await;
    let client = static_client(&server).await;

    let err = client
        .bulk_insert_chunked("articles", &items(3), 0)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::ChunkSize)
    ));
}

// ============================================================================
// delete_all_items
// ============================================================================

#[tokio::test]
async fn test_delete_all_items_in_chunks() {
    let server = MockServer::start().await;
    mount_fields(
        &server,
        "articles",
        json!([field("articles", "id", 1, true), field("articles", "title", 2, false)]),
    )
    .await;

    let ids: Vec<Value> = (1..=250).map(|id| json!({"id": id})).collect();
    Mock::given(method("GET"))
        .and(path("/items/articles"))
        .and(query_param("fields", "id"))
        .and(query_param("limit", "-1"))
        .respond_with(envelope(Value::Array(ids)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/articles"))
        .respond_with(ResponseTemplate::new(204))
        .expect(3)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let deleted = client.delete_all_items("articles").await.unwrap();
    assert_eq!(deleted, 250);

    let bodies = bodies_to(&server, "DELETE", "/items/articles").await;
    assert_eq!(bodies[0], Value::Array((1..=100).map(Value::from).collect()));
    assert_eq!(bodies[2].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn test_delete_all_items_uses_primary_key_name() {
    let server = MockServer::start().await;
    mount_fields(
        &server,
        "sessions",
        json!([field("sessions", "token", 1, true)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/items/sessions"))
        .and(query_param("fields", "token"))
        .respond_with(envelope(json!([{"token": "a"}, {"token": "b"}])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/sessions"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    client.delete_all_items("sessions").await.unwrap();

    let bodies = bodies_to(&server, "DELETE", "/items/sessions").await;
    assert_eq!(bodies, vec![json!(["a", "b"])]);
}

#[tokio::test]
async fn test_delete_all_items_on_empty_collection() {
    let server = MockServer::start().await;
    mount_fields(&server, "articles", json!([field("articles", "id", 1, true)])).await;
    Mock::given(method("GET"))
        .and(path("/items/articles"))
        .respond_with(envelope(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/articles"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let err = client.delete_all_items("articles").await.unwrap_err();

    assert!(matches!(err, Error::EmptyCollection { ref collection } if collection == "articles"));
}

// ============================================================================
// Fields and collections
// ============================================================================

#[tokio::test]
async fn test_get_all_fields_strips_meta_id() {
    let server = MockServer::start().await;
    mount_fields(
        &server,
        "articles",
        json!([
            field("articles", "id", 10, true),
            field("articles", "title", 11, false),
            {"collection": "articles", "field": "divider", "type": "alias", "schema": null, "meta": null}
        ]),
    )
    .await;

    let client = static_client(&server).await;
    let fields = client.get_all_fields("articles").await.unwrap();

    assert_eq!(fields.len(), 3);
    for field in &fields {
        if let Some(meta) = &field.meta {
            assert!(!meta.contains_key("id"), "meta.id left on {}", field.field);
            assert_eq!(meta["interface"], "input");
        }
    }
}

#[tokio::test]
async fn test_get_pk_field() {
    let server = MockServer::start().await;
    mount_fields(
        &server,
        "articles",
        json!([field("articles", "title", 2, false), field("articles", "id", 1, true)]),
    )
    .await;

    let client = static_client(&server).await;
    let pk = client.get_pk_field("articles").await.unwrap();
    assert_eq!(pk.field, "id");
    assert_eq!(pk.field_type.as_deref(), Some("integer"));
}

#[tokio::test]
async fn test_get_pk_field_without_primary_key() {
    let server = MockServer::start().await;
    mount_fields(&server, "view", json!([field("view", "title", 2, false)])).await;

    let client = static_client(&server).await;
    let err = client.get_pk_field("view").await.unwrap_err();

    assert!(matches!(
        err,
        Error::NotFound(NotFoundError::PrimaryKey { ref collection }) if collection == "view"
    ));
}

#[tokio::test]
async fn test_get_all_fk_fields() {
    let server = MockServer::start().await;
    let mut fk = field("comments", "article", 3, false);
    fk["schema"]["foreign_key_table"] = json!("articles");
    mount_fields(
        &server,
        "comments",
        json!([field("comments", "id", 1, true), field("comments", "body", 2, false), fk]),
    )
    .await;

    let client = static_client(&server).await;
    let fks = client.get_all_fk_fields("comments").await.unwrap();

    assert_eq!(fks.len(), 1);
    assert_eq!(fks[0].field, "article");
    assert_eq!(fks[0].foreign_key_table(), Some("articles"));
}

#[tokio::test]
async fn test_collection_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(envelope(json!([
            {"collection": "directus_users", "meta": {"system": true}, "schema": {"name": "directus_users"}},
            {"collection": "articles", "meta": {}, "schema": {"name": "articles"}},
            {"collection": "comments", "meta": {}, "schema": {"name": "comments"}}
        ])))
        .mount(&server)
        .await;

    let client = static_client(&server).await;

    assert!(client.collection_exists("articles").await.unwrap());
    assert!(client.collection_exists("directus_users").await.unwrap());
    assert!(!client.collection_exists("no_collection").await.unwrap());

    let mut names = client.get_all_user_created_collection_names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["articles", "comments"]);
}

// ============================================================================
// duplicate_collection
// ============================================================================

#[tokio::test]
async fn test_duplicate_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/articles"))
        .respond_with(envelope(json!({
            "collection": "articles",
            "meta": {"collection": "articles", "icon": "article", "note": null},
            "schema": {"name": "articles", "comment": null}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/collections"))
        .respond_with(envelope(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_fields(
        &server,
        "articles",
        json!([
            field("articles", "id", 1, true),
            field("articles", "name", 2, false),
            field("articles", "comments", 3, false)
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/fields/articles_copy"))
        .respond_with(envelope(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let source_items = json!([
        {"id": 1, "name": "first", "comments": "a"},
        {"id": 2, "name": "second", "comments": "b"},
        {"id": 3, "name": "third", "comments": "c"}
    ]);
    Mock::given(method("GET"))
        .and(path("/items/articles"))
        .and(query_param("limit", "-1"))
        .respond_with(envelope(source_items.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/items/articles_copy"))
        .respond_with(envelope(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    client
        .duplicate_collection("articles", "articles_copy")
        .await
        .unwrap();

    let descriptor = &bodies_to(&server, "POST", "/collections").await[0];
    assert_eq!(descriptor["collection"], "articles_copy");
    assert_eq!(descriptor["meta"]["collection"], "articles_copy");
    assert_eq!(descriptor["schema"]["name"], "articles_copy");
    assert_eq!(descriptor["meta"]["icon"], "article");

    let fields = bodies_to(&server, "POST", "/fields/articles_copy").await;
    let names: Vec<&str> = fields.iter().map(|f| f["field"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["name", "comments"]);
    for f in &fields {
        assert!(f["meta"].get("id").is_none());
        assert_eq!(f["collection"], "articles_copy");
    }

    let inserted = bodies_to(&server, "POST", "/items/articles_copy").await;
    assert_eq!(inserted, vec![source_items]);
}

#[tokio::test]
async fn test_duplicate_collection_stops_when_create_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/articles"))
        .respond_with(envelope(json!({"collection": "articles", "meta": {}, "schema": {}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{"message": "Collection \"articles_copy\" already exists."}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fields/articles"))
        .respond_with(envelope(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let err = client
        .duplicate_collection("articles", "articles_copy")
        .await
        .unwrap_err();
    assert_eq!(err.as_api().unwrap().status, 400);
}

// ============================================================================
// Relations
// ============================================================================

fn collision() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "errors": [{"message": "Field \"id\" has to be unique.", "extensions": {"code": "RECORD_NOT_UNIQUE"}}]
    }))
}

fn relation() -> RelationDescriptor {
    RelationDescriptor {
        collection: "comments".into(),
        field: "article".into(),
        related_collection: Some("articles".into()),
    }
}

#[tokio::test]
async fn test_get_relations_projects_three_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/relations/comments"))
        .respond_with(envelope(json!([{
            "collection": "comments",
            "field": "article",
            "related_collection": "articles",
            "schema": {"on_delete": "SET NULL"},
            "meta": {"id": 12, "junction_field": null}
        }])))
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let relations = client.get_relations("comments").await.unwrap();
    assert_eq!(relations, vec![relation()]);
}

#[tokio::test]
async fn test_post_relation_with_extra_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(envelope(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let err = client
        .post_relation(&json!({
            "collection": "comments",
            "field": "article",
            "related_collection": "articles",
            "meta": {"id": 4}
        }))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::RelationKeys { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_post_relation_retries_id_collision() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(collision())
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(envelope(json!({"collection": "comments"})))
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    client.post_relation(&relation()).await.unwrap();

    let bodies = bodies_to(&server, "POST", "/relations").await;
    assert_eq!(bodies.len(), 3);
    // The identical payload every time.
    assert!(bodies.iter().all(|b| *b == bodies[0]));
}

#[tokio::test]
async fn test_post_relation_retry_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(collision())
        .expect(3)
        .mount(&server)
        .await;

    let client = DirectusClient::builder(server.uri())
        .static_token("admin")
        .retry_policy(RetryPolicy::bounded(3))
        .build()
        .await
        .unwrap();

    let err = client.post_relation(&relation()).await.unwrap_err();
    assert!(err.is_unique_id_collision());
}

#[tokio::test]
async fn test_post_relation_other_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"message": "You don't have permission to access this."}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let err = client.post_relation(&relation()).await.unwrap_err();
    assert_eq!(err.as_api().unwrap().status, 403);
}

#[tokio::test]
async fn test_copy_relations_rewrites_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/relations/comments"))
        .respond_with(envelope(json!([
            {"collection": "comments", "field": "article", "related_collection": "articles", "meta": {"id": 1}},
            {"collection": "comments", "field": "author", "related_collection": "directus_users", "meta": {"id": 2}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(envelope(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = static_client(&server).await;
    let copied = client
        .copy_relations("comments", "comments_copy")
        .await
        .unwrap();
    assert_eq!(copied, 2);

    let bodies = bodies_to(&server, "POST", "/relations").await;
    assert_eq!(
        bodies[1],
        json!({"collection": "comments_copy", "field": "author", "related_collection": "directus_users"})
    );
}
