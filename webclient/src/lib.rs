// exported modules
pub mod error;
pub mod model;

// client impls
pub mod codeforces;

// re-exports
pub use codeforces::CodeforcesClient;
pub use error::*;
pub use model::*;

// internal modules
mod http;
mod util;
