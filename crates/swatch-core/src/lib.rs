pub mod api;
pub mod config;
pub mod resolver;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use api::{process_change, process_change_json, OptionChange, ProcessError};
pub use resolver::{AxisAvailability, Resolution, SelectionState, SelectionStatus, VariantResolver};
pub use view::{AddButton, VariantChange};

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
