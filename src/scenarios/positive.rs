use super::{Check, Checks, ReadAfterCreate, ScenarioContext, ScenarioError};
use crate::fixtures;
use crate::pet_client::{PetClient, ResponseExt};
use reqwest::StatusCode;
use serde_json::Value;

pub async fn create_pet(
    client: &PetClient,
    context: &mut ScenarioContext,
) -> Result<Vec<Check>, ScenarioError> {
    let pet = fixtures::create_pet();
    let response = client.create_pet(&pet).await?;

    context.created_pet_id = response.field("id").and_then(Value::as_i64);
    tracing::info!(created_pet_id = ?context.created_pet_id, "Captured created pet id");

    let mut checks = Checks::default();
    checks
        .equal("THEN API should return status 200", response.status, StatusCode::OK)
        .equal(
            "AND response body should match the sent data",
            response.field("name").and_then(Value::as_str),
            pet.name.as_deref(),
        );
    Ok(checks.into_vec())
}

pub async fn get_created_pet(
    client: &PetClient,
    read_after_create: &ReadAfterCreate,
    context: &ScenarioContext,
) -> Result<Vec<Check>, ScenarioError> {
    let id = context.created_pet_id()?;
    let response = read_after_create.read(client, id).await?;

    let mut checks = Checks::default();
    checks
        .equal("THEN API should return status 200", response.status, StatusCode::OK)
        .equal(
            "AND returned pet should match created pet ID",
            response.field("id").and_then(Value::as_i64),
            Some(id),
        );
    Ok(checks.into_vec())
}

pub async fn update_created_pet(
    client: &PetClient,
    context: &ScenarioContext,
) -> Result<Vec<Check>, ScenarioError> {
    let id = context.created_pet_id()?;
    let update = fixtures::update_pet();
    let pet = fixtures::create_pet().merged_with(&update).with_id(id);
    let response = client.update_pet(&pet).await?;

    let mut checks = Checks::default();
    checks
        .equal("THEN API should return status 200", response.status, StatusCode::OK)
        .equal(
            "AND response should reflect updated name",
            response.field("name").and_then(Value::as_str),
            update.name.as_deref(),
        )
        .equal(
            "AND response should reflect updated status",
            response.field("status").and_then(Value::as_str),
            update.status.as_deref(),
        );
    Ok(checks.into_vec())
}

pub async fn find_pets_by_status(client: &PetClient) -> Result<Vec<Check>, ScenarioError> {
    let status = fixtures::FIND_PET_STATUS.as_str();
    let response = client.find_pets_by_status(status).await?;
    let pets = response.as_array().cloned().unwrap_or_default();
    tracing::info!(found = pets.len(), sample = ?pets.first(), "Pets found by status");

    let mut checks = Checks::default();
    checks
        .equal("THEN API should return status 200", response.status, StatusCode::OK)
        .that(
            "AND response should contain pets with matching status",
            response.as_array().is_some()
                && pets
                    .iter()
                    .all(|pet| pet.get("status").and_then(Value::as_str) == Some(status)),
            || format!("not every pet has status {:?}: {}", status, response.body),
        )
        .that(
            "AND at least one pet should be returned",
            !pets.is_empty(),
            || "no pet was returned".to_string(),
        );
    Ok(checks.into_vec())
}

pub async fn delete_created_pet(
    client: &PetClient,
    context: &ScenarioContext,
) -> Result<Vec<Check>, ScenarioError> {
    let id = context.created_pet_id()?;
    let response = client.delete_pet(id).await?;
    let expected_message = id.to_string();
    tracing::info!(pet_id = id, "{}", fixtures::DELETE_PET_MESSAGE);

    let mut checks = Checks::default();
    checks
        .equal("THEN API should return status 200", response.status, StatusCode::OK)
        .equal(
            "AND response message should match deleted pet ID",
            response.message(),
            Some(expected_message.as_str()),
        );
    Ok(checks.into_vec())
}

pub async fn get_deleted_pet(
    client: &PetClient,
    context: &ScenarioContext,
) -> Result<Vec<Check>, ScenarioError> {
    let id = context.created_pet_id()?;
    let response = client.get_pet_by_id(id).await.accept_error_status()?;
    let message = response.api_message().unwrap_or_default().message;

    let mut checks = Checks::default();
    checks
        .equal(
            "THEN API should return 404 (not found)",
            response.status,
            StatusCode::NOT_FOUND,
        )
        .that(
            "AND response message should say the pet is not found",
            message
                .as_deref()
                .is_some_and(|message| message.contains("Pet not found")),
            || format!("unexpected message {:?}", message),
        );
    Ok(checks.into_vec())
}
