// Persona tree: dotted-path addressing and the validated, snapshot-style store.

pub mod path;
pub mod store;

pub use path::{assign, resolve, resolve_parent_mut, AttributePath, Assignment, Identifiable};
pub use store::{contextual_weight, PersonaIdentity, PersonaStore};
