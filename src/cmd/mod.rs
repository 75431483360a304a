//! CLI command implementations.
//!
//! | Module   | Commands handled                          |
//! |----------|-------------------------------------------|
//! | `form`   | `Mask`, `Validate`, `Payload`, `Submit`   |
//! | `config` | `Config`                                  |

pub mod config;
pub mod form;

pub use config::cmd_config;
pub use form::{cmd_mask, cmd_payload, cmd_submit, cmd_validate};
