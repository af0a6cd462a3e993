// Text composers. Template selection over the persona store, never generation.
// Randomness is always injected so callers and tests can seed it.

pub mod feedback;
pub mod question;
pub mod reply;
pub mod response;
pub mod tone;

pub use feedback::{assess_pitch, compose_pitch_feedback, PitchAssessment};
pub use question::{compose_question, ComposedQuestion};
pub use reply::compose_pitch_reply;
pub use response::{compose_response, ComposedResponse};
