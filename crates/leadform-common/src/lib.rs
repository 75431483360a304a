//! Shared domain types for the leadform submission pipeline.
//!
//! Plain data only: the live form values, the snapshots taken at submit time and the
//! JSON document posted to the webhook. Behaviour (masking, validation, delivery) lives
//! in the `leadform` crate.

pub mod form;
pub mod payload;
pub mod timestamp;

pub use form::{Field, FieldValidationResult, FormSnapshot, FormValues};
pub use payload::{OutboundPayload, PageData, PayloadMetadata, TrackingSnapshot};
