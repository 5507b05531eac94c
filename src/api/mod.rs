mod client;
mod error;
mod facade;
pub mod lenient;
pub mod responses;
mod source;

pub use client::HttpDataSource;
pub use error::FetchError;
pub use facade::{Catalog, DataFacade};
pub use source::{DataSource, WordQuery};
