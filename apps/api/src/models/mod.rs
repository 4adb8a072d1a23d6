pub mod analysis;
pub mod credentials;
pub mod post;
pub mod schedule;

/// Owner of every stored record until accounts exist.
pub const DEFAULT_USER_ID: &str = "default";
