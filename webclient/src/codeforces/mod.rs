pub mod client;
pub mod scrape;
pub mod urls;

pub use client::*;
pub use urls::*;
