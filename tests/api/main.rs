#[path = "../common/mod.rs"]
mod common;

mod configuration;
mod read_after_create;
mod suite;
