//! Decoders for vision service responses. Fetching is done elsewhere; these only turn a response
//! body into a [`SignalBundle`](crate::signal::SignalBundle).

mod clarifai;
mod google_vision;

pub use clarifai::parse_clarifai;
pub use google_vision::parse_google_vision;
