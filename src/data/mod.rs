pub mod provider;
pub mod store;

// Re-export key types for convenience
pub use provider::{DataProvider, FileProvider};
pub use store::{DataStore, Dataset, FieldSet, Manifest, SourceOverride};
