//! Routes of the pet store API, relative to the base URL.

use std::fmt::Display;

pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";

pub const PET: &str = "/pet";

/// The identifier is embedded verbatim, invalid ones included.
pub fn pet_by_id(id: impl Display) -> String {
    format!("{}/{}", PET, id)
}

/// The status is not URL-encoded.
pub fn find_by_status(status: &str) -> String {
    format!("{}/findByStatus?status={}", PET, status)
}
