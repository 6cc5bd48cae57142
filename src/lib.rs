pub mod app;
pub mod canvas;
pub mod collection;
pub mod config;
pub mod error;
pub mod gallery;
pub mod image;
pub mod manifest;
pub mod model;
pub mod network;
pub mod query;

#[cfg(test)]
mod test_server;

pub use app::{App, Notice, Ui};
pub use config::Config;
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
