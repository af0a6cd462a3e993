pub mod journalist;

pub use journalist::{find_seed_profile, seed_profiles, JournalistProfile};
