//! The ordered GIVEN/WHEN/THEN scenarios of the suite.
//!
//! Scenarios share a [`ScenarioContext`]: the pet created by the first one is
//! read, updated and deleted by the later ones, so they must run in order.

mod checks;
mod negative;
mod positive;

pub use checks::{Check, Checks};
pub use negative::{
    create_pet_missing_field, delete_pet_invalid_id, find_pets_by_invalid_status,
    get_non_existent_pet, update_pet_invalid_status,
};
pub use positive::{
    create_pet, delete_created_pet, find_pets_by_status, get_created_pet, get_deleted_pet,
    update_created_pet,
};

use crate::pet_client::{ApiResponse, PetClient, PetClientError};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::Instrument;

/// State handed from one scenario to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioContext {
    pub created_pet_id: Option<i64>,
}

impl ScenarioContext {
    pub fn created_pet_id(&self) -> Result<i64, ScenarioError> {
        self.created_pet_id.ok_or(ScenarioError::MissingCreatedPet)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("No pet id was captured by the create scenario")]
    MissingCreatedPet,
    #[error(transparent)]
    Client(#[from] PetClientError),
}

/// How a freshly created pet is read back: a fixed delay, then up to
/// `max_attempts` reads spaced by `poll_interval` while the pet is not found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadAfterCreate {
    pub delay: Duration,
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for ReadAfterCreate {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
            max_attempts: 1,
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl ReadAfterCreate {
    #[tracing::instrument(name = "Reading pet after create", skip(self, client))]
    pub async fn read(&self, client: &PetClient, id: i64) -> Result<ApiResponse, PetClientError> {
        tokio::time::sleep(self.delay).await;
        for attempt in 1..self.max_attempts.max(1) {
            match client.get_pet_by_id(id).await {
                Err(PetClientError::Http(response)) if response.status == StatusCode::NOT_FOUND => {
                    tracing::debug!(
                        "Pet {} not readable yet (attempt {}/{}), retrying in {:?}",
                        id,
                        attempt,
                        self.max_attempts,
                        self.poll_interval
                    );
                    tokio::time::sleep(self.poll_interval).await;
                }
                outcome => return outcome,
            }
        }
        client.get_pet_by_id(id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    CreatePet,
    GetCreatedPet,
    UpdateCreatedPet,
    FindPetsByStatus,
    DeleteCreatedPet,
    GetDeletedPet,
    CreatePetMissingField,
    GetNonExistentPet,
    FindPetsByInvalidStatus,
    DeletePetInvalidId,
    UpdatePetInvalidStatus,
}

impl Scenario {
    /// Execution order.
    pub const ALL: [Scenario; 11] = [
        Scenario::CreatePet,
        Scenario::GetCreatedPet,
        Scenario::UpdateCreatedPet,
        Scenario::FindPetsByStatus,
        Scenario::DeleteCreatedPet,
        Scenario::GetDeletedPet,
        Scenario::CreatePetMissingField,
        Scenario::GetNonExistentPet,
        Scenario::FindPetsByInvalidStatus,
        Scenario::DeletePetInvalidId,
        Scenario::UpdatePetInvalidStatus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::CreatePet => "01_GIVEN a valid pet payload WHEN user sends POST /pet",
            Scenario::GetCreatedPet => {
                "02_GIVEN an existing pet ID WHEN user sends GET /pet/{petId}"
            }
            Scenario::UpdateCreatedPet => {
                "03_GIVEN an existing pet with updated data WHEN user sends PUT /pet"
            }
            Scenario::FindPetsByStatus => {
                "04_GIVEN a valid status value WHEN user sends GET /pet/findByStatus?status={status}"
            }
            Scenario::DeleteCreatedPet => {
                "05_GIVEN an existing pet ID WHEN user sends DELETE /pet/{petId}"
            }
            Scenario::GetDeletedPet => {
                "05_GIVEN an existing pet ID WHEN user tries to GET the deleted pet"
            }
            Scenario::CreatePetMissingField => {
                "06_GIVEN a pet payload with missing required field WHEN user sends POST /pet"
            }
            Scenario::GetNonExistentPet => {
                "07_GIVEN a non-existent pet ID WHEN user sends GET /pet/{petId}"
            }
            Scenario::FindPetsByInvalidStatus => {
                "08_GIVEN an invalid status query WHEN user sends GET /pet/findByStatus?status={status}"
            }
            Scenario::DeletePetInvalidId => {
                "09_GIVEN an invalid pet ID format WHEN user sends DELETE /pet/{petId}"
            }
            Scenario::UpdatePetInvalidStatus => {
                "10_GIVEN an existing pet with invalid status WHEN user sends PUT /pet"
            }
        }
    }

    pub async fn run(
        &self,
        client: &PetClient,
        read_after_create: &ReadAfterCreate,
        context: &mut ScenarioContext,
    ) -> Result<Vec<Check>, ScenarioError> {
        match self {
            Scenario::CreatePet => create_pet(client, context).await,
            Scenario::GetCreatedPet => get_created_pet(client, read_after_create, context).await,
            Scenario::UpdateCreatedPet => update_created_pet(client, context).await,
            Scenario::FindPetsByStatus => find_pets_by_status(client).await,
            Scenario::DeleteCreatedPet => delete_created_pet(client, context).await,
            Scenario::GetDeletedPet => get_deleted_pet(client, context).await,
            Scenario::CreatePetMissingField => create_pet_missing_field(client).await,
            Scenario::GetNonExistentPet => get_non_existent_pet(client).await,
            Scenario::FindPetsByInvalidStatus => find_pets_by_invalid_status(client).await,
            Scenario::DeletePetInvalidId => delete_pet_invalid_id(client).await,
            Scenario::UpdatePetInvalidStatus => update_pet_invalid_status(client, context).await,
        }
    }
}

#[derive(Debug)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    /// The checks that ran, or why the setup call could not complete.
    pub outcome: Result<Vec<Check>, ScenarioError>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, Ok(checks) if checks.iter().all(Check::passed))
    }

    pub fn failures(&self) -> Vec<String> {
        match &self.outcome {
            Ok(checks) => checks
                .iter()
                .filter_map(|check| {
                    check.failure.as_ref().map(|failure| {
                        format!("{}: {}: {}", self.scenario.name(), check.description, failure)
                    })
                })
                .collect(),
            Err(e) => vec![format!("{}: setup failed: {}", self.scenario.name(), e)],
        }
    }
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub reports: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.reports.iter().all(ScenarioReport::passed)
    }

    pub fn failures(&self) -> Vec<String> {
        self.reports
            .iter()
            .flat_map(ScenarioReport::failures)
            .collect()
    }

    pub fn report(&self, scenario: Scenario) -> Option<&ScenarioReport> {
        self.reports.iter().find(|r| r.scenario == scenario)
    }

    pub fn log_summary(&self) {
        let passed = self.reports.iter().filter(|r| r.passed()).count();
        for report in &self.reports {
            if report.passed() {
                tracing::info!(scenario = report.scenario.name(), "PASSED");
            } else {
                tracing::error!(
                    scenario = report.scenario.name(),
                    failures = ?report.failures(),
                    "FAILED"
                );
            }
        }
        tracing::info!("{}/{} scenarios passed", passed, self.reports.len());
    }
}

/// Runs every scenario, one at a time, against a single client.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    client: PetClient,
    read_after_create: ReadAfterCreate,
}

impl ScenarioRunner {
    pub fn new(client: PetClient, read_after_create: ReadAfterCreate) -> Self {
        Self {
            client,
            read_after_create,
        }
    }

    pub async fn run(&self) -> SuiteReport {
        let mut context = ScenarioContext::default();
        self.run_with_context(&Scenario::ALL, &mut context).await
    }

    /// Runs `scenarios` in the given order, threading `context` through them.
    /// A failed setup is recorded and the next scenario still runs.
    pub async fn run_with_context(
        &self,
        scenarios: &[Scenario],
        context: &mut ScenarioContext,
    ) -> SuiteReport {
        let mut suite = SuiteReport::default();
        for scenario in scenarios {
            let span = tracing::info_span!("Scenario", name = scenario.name());
            let outcome = scenario
                .run(&self.client, &self.read_after_create, context)
                .instrument(span)
                .await;
            if let Err(e) = &outcome {
                tracing::error!(scenario = scenario.name(), "Scenario setup failed: {}", e);
            }
            suite.reports.push(ScenarioReport {
                scenario: *scenario,
                outcome,
            });
        }
        suite
    }
}
