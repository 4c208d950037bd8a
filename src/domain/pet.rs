use serde::{Deserialize, Serialize};

/// Statuses the pet store knows. On the wire a status is plain text, see [`Pet::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

impl std::fmt::Display for PetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pet as it travels over the wire.
///
/// Every field is optional: negative payloads leave required fields out and
/// the status is free text so that out-of-domain values can be sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Pet {
    /// Overlays `overrides` on top of `self`: every field set in `overrides` wins.
    pub fn merged_with(&self, overrides: &Pet) -> Pet {
        Pet {
            id: overrides.id.or(self.id),
            name: overrides.name.clone().or_else(|| self.name.clone()),
            photo_urls: overrides
                .photo_urls
                .clone()
                .or_else(|| self.photo_urls.clone()),
            status: overrides.status.clone().or_else(|| self.status.clone()),
        }
    }

    pub fn with_id(mut self, id: i64) -> Pet {
        self.id = Some(id);
        self
    }
}
