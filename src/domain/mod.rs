mod api_message;
mod pet;

pub use api_message::ApiMessage;
pub use pet::{Pet, PetStatus};
