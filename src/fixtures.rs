//! Named payloads driving the scenarios.

use crate::domain::{Pet, PetStatus};
use std::sync::atomic::{AtomicI64, Ordering};

pub const PET_NAME: &str = "Mochi";
pub const PET_PHOTO_URL: &str = "https://example.com/photo.jpg";
pub const UPDATED_PET_NAME: &str = "Mochi Updated";
pub const FIND_PET_STATUS: PetStatus = PetStatus::Available;
pub const DELETE_PET_MESSAGE: &str = "Pet deleted successfully";

pub const NON_EXISTENT_PET_ID: i64 = 99999999;
pub const INVALID_FIND_STATUS: &str = "invalid_status_value983475235325";
pub const INVALID_PET_ID: &str = "invalid_id_string";
pub const INVALID_STATUS_PET_NAME: &str = "Mochi Invalid Status";
pub const INVALID_PET_STATUS: &str = "invalid_status_value1111111111";

static LAST_PET_ID: AtomicI64 = AtomicI64::new(0);

/// Identifier derived from the wall clock, in milliseconds since the epoch.
///
/// Strictly increasing within the process: two calls in the same millisecond
/// still get distinct ids.
pub fn timestamp_id() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_PET_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or(now);
    now.max(previous + 1)
}

pub fn create_pet() -> Pet {
    Pet {
        id: Some(timestamp_id()),
        name: Some(PET_NAME.into()),
        photo_urls: Some(vec![PET_PHOTO_URL.into()]),
        status: Some(PetStatus::Available.to_string()),
    }
}

pub fn update_pet() -> Pet {
    Pet {
        name: Some(UPDATED_PET_NAME.into()),
        status: Some(PetStatus::Sold.to_string()),
        ..Pet::default()
    }
}

// Negative payloads

pub fn create_pet_missing_field() -> Pet {
    Pet {
        status: Some(PetStatus::Available.to_string()),
        ..Pet::default()
    }
}

pub fn update_pet_invalid_status() -> Pet {
    Pet {
        name: Some(INVALID_STATUS_PET_NAME.into()),
        status: Some(INVALID_PET_STATUS.into()),
        ..Pet::default()
    }
}
