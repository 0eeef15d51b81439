pub mod archive;
pub mod error;
pub mod fetcher;
pub mod locator;
pub mod product;
pub mod series;
