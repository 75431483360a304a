pub mod config;
pub mod errors;
pub mod logging;
pub mod orchestrator;
pub mod payload;
pub mod phone;
pub mod tracking;
pub mod transport;
pub mod ui;
pub mod validation;
pub mod view;

pub use leadform_common as common;
