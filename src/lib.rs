pub mod art;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod info;
pub mod logging;
pub mod renderer;
pub mod template;

pub use error::{Error, Result};
