use crate::common::{MockPetstore, fast_read_after_create, spawn_petstore};
use claims::assert_ok;
use petstore_e2e::pet_client::PetClientError;
use petstore_e2e::scenarios::{ReadAfterCreate, ScenarioContext, get_created_pet};
use reqwest::StatusCode;
use serde_json::json;
use std::time::{Duration, Instant};

#[tokio::test]
async fn read_polls_until_the_pet_is_visible() {
    let test_petstore = spawn_petstore(MockPetstore::empty()).await;
    let id = test_petstore.petstore.insert(json!({ "id": 4, "name": "Mochi" }));
    test_petstore.petstore.hide_next_reads(2);

    let response = fast_read_after_create(3)
        .read(&test_petstore.client, id)
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(test_petstore.received_calls().await.len(), 3);
}

#[tokio::test]
async fn read_gives_up_after_the_last_attempt() {
    let test_petstore = spawn_petstore(MockPetstore::empty()).await;
    let id = test_petstore.petstore.insert(json!({ "id": 4, "name": "Mochi" }));
    test_petstore.petstore.hide_next_reads(5);

    let outcome = fast_read_after_create(2)
        .read(&test_petstore.client, id)
        .await;

    match outcome {
        Err(PetClientError::Http(response)) => assert_eq!(response.status, StatusCode::NOT_FOUND),
        other => panic!("Expected a 404, got {:?}", other),
    }
    assert_eq!(test_petstore.received_calls().await.len(), 2);
}

#[tokio::test]
async fn single_attempt_is_a_flat_delay_then_one_read() {
    let test_petstore = spawn_petstore(MockPetstore::empty()).await;
    let id = test_petstore.petstore.insert(json!({ "id": 4, "name": "Mochi" }));
    let policy = ReadAfterCreate {
        delay: Duration::from_millis(200),
        max_attempts: 1,
        poll_interval: Duration::from_secs(60),
    };

    let started = Instant::now();
    let outcome = policy.read(&test_petstore.client, id).await;

    assert_ok!(outcome);
    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(test_petstore.received_calls().await.len(), 1);
}

#[tokio::test]
async fn get_created_pet_tolerates_a_lagging_read() {
    let test_petstore = spawn_petstore(MockPetstore::empty()).await;
    let id = test_petstore.petstore.insert(json!({ "id": 8, "name": "Mochi" }));
    test_petstore.petstore.hide_next_reads(1);
    let context = ScenarioContext {
        created_pet_id: Some(id),
    };

    let checks = get_created_pet(&test_petstore.client, &fast_read_after_create(2), &context)
        .await
        .unwrap();

    assert!(checks.iter().all(|check| check.passed()), "{:?}", checks);
}
