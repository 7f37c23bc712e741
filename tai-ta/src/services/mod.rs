//! Service modules for the terrain analysis paths
//!
//! - `classifier_client` — image path: remote vision-classifier adapter
//! - `geology_client` — coordinate path: remote geology service client

pub mod classifier_client;
pub mod geology_client;

pub use classifier_client::{ClassifierClient, ClassifierError};
pub use geology_client::{GeologyClient, GeologyError, DEFAULT_GRID_SIZE, DEFAULT_VARIATION};
