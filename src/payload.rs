use chrono::{DateTime, Utc};

use leadform_common::{
    FormSnapshot, FormValues, OutboundPayload, PayloadMetadata, TrackingSnapshot,
};

use crate::phone::digits_only;
use crate::validation::trim_input;

/// Normalize the live form values into the snapshot sent to the webhook.
pub fn capture_form(values: &FormValues) -> FormSnapshot {
    FormSnapshot {
        name: trim_input(&values.name).to_string(),
        email: trim_input(&values.email).to_lowercase(),
        phone: trim_input(&values.phone).to_string(),
        phone_raw: digits_only(&values.phone),
        accepted_policy: values.consent,
    }
}

/// Assemble the outbound document. Pure: `timestamp` is the only moving part.
pub fn build_payload(
    form: &FormSnapshot,
    tracking: &TrackingSnapshot,
    metadata: &PayloadMetadata,
    timestamp: DateTime<Utc>,
) -> OutboundPayload {
    OutboundPayload {
        timestamp,
        form: form.clone(),
        tracking: tracking.clone(),
        metadata: metadata.clone(),
    }
}
