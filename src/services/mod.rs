// Service exports
pub mod generator;
pub mod loader;
pub mod report;

pub use generator::ProfileGenerator;
pub use loader::{load_network, load_profiles, LoaderError};
pub use report::{format_commute, format_matches, format_path};
