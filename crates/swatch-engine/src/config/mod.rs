pub mod loader;

pub use swatch_core::config::schema;
