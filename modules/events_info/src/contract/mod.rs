pub mod client;
pub mod error;
pub mod model;

pub use client::EventsInfoApi;
pub use error::EventsInfoError;
pub use model::{Attendee, Event, EventPatch, Identity, NewEvent, Registration, User};
