use crate::common::{MockPetstore, client_for, fast_read_after_create, init_tracing, spawn_petstore};
use petstore_e2e::scenarios::{Scenario, ScenarioError, ScenarioRunner};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn every_scenario_passes_against_the_demo_petstore_behaviour() {
    // Arrange
    let test_petstore = spawn_petstore(MockPetstore::seeded()).await;
    let runner = ScenarioRunner::new(test_petstore.client.clone(), fast_read_after_create(3));

    // Act
    let report = runner.run().await;

    // Assert
    assert!(report.passed(), "{:#?}", report.failures());
    assert_eq!(report.reports.len(), Scenario::ALL.len());
}

#[tokio::test]
async fn scenarios_run_one_at_a_time_in_order() {
    let test_petstore = spawn_petstore(MockPetstore::seeded()).await;
    let runner = ScenarioRunner::new(test_petstore.client.clone(), fast_read_after_create(1));

    let report = runner.run().await;
    let calls = test_petstore.received_calls().await;

    assert!(report.passed(), "{:#?}", report.failures());
    let methods: Vec<&str> = calls
        .iter()
        .map(|call| call.split(' ').next().unwrap_or_default())
        .collect();
    assert_eq!(
        methods,
        vec![
            "POST", "GET", "PUT", "GET", "DELETE", "GET", "POST", "GET", "GET", "DELETE", "PUT"
        ]
    );
    assert_eq!(calls[8], "GET /pet/findByStatus");
    assert_eq!(calls[9], "DELETE /pet/invalid_id_string");
}

#[tokio::test]
async fn invalid_status_update_stores_the_deleted_pet_again() {
    let test_petstore = spawn_petstore(MockPetstore::seeded()).await;
    let runner = ScenarioRunner::new(test_petstore.client.clone(), fast_read_after_create(1));

    let _ = runner.run().await;
    let calls = test_petstore.received_calls().await;
    let deleted_id: i64 = calls[4]
        .trim_start_matches("DELETE /pet/")
        .parse()
        .unwrap();

    // Scenario 10 upserts the pet again with the invalid status.
    let pet = test_petstore.petstore.get(deleted_id).unwrap();
    assert_eq!(pet["status"], "invalid_status_value1111111111");
}

#[tokio::test]
async fn dependent_scenarios_fail_when_creation_fails() {
    init_tracing();
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let runner = ScenarioRunner::new(client_for(mock_server.uri()), fast_read_after_create(1));

    let report = runner.run().await;

    assert!(!report.passed());
    assert_eq!(report.reports.len(), Scenario::ALL.len());
    for scenario in [
        Scenario::GetCreatedPet,
        Scenario::UpdateCreatedPet,
        Scenario::DeleteCreatedPet,
        Scenario::GetDeletedPet,
        Scenario::UpdatePetInvalidStatus,
    ] {
        let outcome = &report.report(scenario).unwrap().outcome;
        assert!(
            matches!(outcome, Err(ScenarioError::MissingCreatedPet)),
            "{:?}: {:?}",
            scenario,
            outcome
        );
    }
    // Negative scenarios still assert on the error response.
    let missing_field = report.report(Scenario::CreatePetMissingField).unwrap();
    let checks = missing_field.outcome.as_ref().unwrap();
    assert!(!checks[0].passed());
}

#[tokio::test]
async fn unreachable_service_fails_every_scenario_without_aborting_the_run() {
    init_tracing();
    // Nothing listens on the discard port.
    let runner = ScenarioRunner::new(
        client_for("http://127.0.0.1:9".into()),
        fast_read_after_create(1),
    );

    let report = runner.run().await;

    assert_eq!(report.reports.len(), Scenario::ALL.len());
    assert!(report.reports.iter().all(|r| r.outcome.is_err()));
    assert_eq!(report.failures().len(), Scenario::ALL.len());
    assert!(report.failures()[0].contains("setup failed"));
}
