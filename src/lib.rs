pub mod configuration;
pub mod domain;
pub mod fixtures;
pub mod locator;
pub mod observer;
pub mod pet_client;
pub mod scenarios;
pub mod telemetry;
