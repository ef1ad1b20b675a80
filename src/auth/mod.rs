pub mod sessions;
pub mod token;
