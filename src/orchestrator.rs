//! Submit flow for the lead form.
//!
//! ```text
//! Idle -> Validating -> Submitting -> Success | Failed -> Idle
//!             \-> Idle (invalid fields: nothing is sent)
//! ```
//!
//! A transport error does not fail the submission unless
//! `SubmissionSettings::assume_delivered` is switched off: the payload is taken to have
//! reached the webhook and the user is sent on to the follow-up page. Real delivery
//! failures only show up in the logs.

use chrono::Utc;
use tracing::{Instrument, debug, error, info, warn};
use uuid::Uuid;

use leadform_common::{
    Field, FieldValidationResult, FormSnapshot, OutboundPayload, PayloadMetadata,
    TrackingSnapshot,
};

use crate::payload::{build_payload, capture_form};
use crate::tracking::TrackingDataSource;
use crate::transport::{Transport, TransportReceipt};
use crate::validation::FieldValidator;
use crate::view::FormView;

pub const INVALID_FORM_MESSAGE: &str = "Por favor, preencha todos os campos corretamente.";
pub const SEND_FAILED_MESSAGE: &str = "Erro ao enviar o formulário. Por favor, tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

impl std::fmt::Display for SubmitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitState::Idle => write!(f, "idle"),
            SubmitState::Validating => write!(f, "validating"),
            SubmitState::Submitting => write!(f, "submitting"),
            SubmitState::Success => write!(f, "success"),
            SubmitState::Failed => write!(f, "failed"),
        }
    }
}

/// Fixed configuration handed to the orchestrator at construction.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub metadata: PayloadMetadata,
    /// Where the user goes after a successful submit.
    pub redirect_to: String,
    /// Treat transport errors as delivered (the landing page's long-standing behavior).
    pub assume_delivered: bool,
    pub validator: FieldValidator,
}

/// How a submit attempt ended.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// At least one field was invalid; nothing was sent.
    Rejected { errors: Vec<(Field, String)> },
    /// The payload went to the transport and the user was redirected.
    /// `receipt` is `None` when delivery failed but was assumed.
    Redirected {
        destination: String,
        payload: OutboundPayload,
        receipt: Option<TransportReceipt>,
    },
    /// Delivery failed and `assume_delivered` is off.
    Failed {
        payload: OutboundPayload,
        error: String,
    },
}

impl SubmitOutcome {
    pub fn is_redirected(&self) -> bool {
        matches!(self, SubmitOutcome::Redirected { .. })
    }
}

/// Record of one submit attempt.
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub attempt_id: Uuid,
    /// States entered during the attempt, in order.
    pub transitions: Vec<SubmitState>,
    pub outcome: SubmitOutcome,
}

pub struct SubmissionOrchestrator<V, S, T> {
    view: V,
    tracking: S,
    transport: T,
    settings: SubmissionSettings,
    state: SubmitState,
}

impl<V, S, T> SubmissionOrchestrator<V, S, T>
where
    V: FormView,
    S: TrackingDataSource,
    T: Transport,
{
    /// Wire the form up. An empty phone control is seeded with the `+CC ` prefix.
    pub fn new(mut view: V, tracking: S, transport: T, settings: SubmissionSettings) -> Self {
        if view.values().phone.is_empty() {
            view.set_phone(&settings.validator.mask().initial_value());
        }
        Self {
            view,
            tracking,
            transport,
            settings,
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Re-mask the phone control after a keystroke; returns the new caret position.
    ///
    /// `cursor` and the returned position are character indices, not byte offsets.
    pub fn on_phone_input(&mut self, raw: &str, cursor: usize) -> usize {
        let mask = self.settings.validator.mask();
        let masked = mask.apply(raw);
        let cursor =
            mask.cursor_after_mask(cursor, raw.chars().count(), masked.chars().count());
        self.view.set_phone(&masked);
        self.on_field_input(Field::Phone);
        cursor
    }

    /// Any edit clears the control's error flag.
    pub fn on_field_input(&mut self, field: Field) {
        self.view.mark_field(field, &FieldValidationResult::ok());
    }

    /// Validate a single control when it loses focus.
    pub fn on_field_blur(&mut self, field: Field) -> bool {
        let result = self
            .settings
            .validator
            .validate_field(field, &self.view.values());
        self.view.mark_field(field, &result);
        result.valid
    }

    /// Validate and mark every control; true only if all are valid.
    pub fn validate_all(&mut self) -> bool {
        self.check_fields().iter().all(|(_, result)| result.valid)
    }

    fn check_fields(&mut self) -> Vec<(Field, FieldValidationResult)> {
        let results = self.settings.validator.validate_all(&self.view.values());
        for (field, result) in &results {
            self.view.mark_field(*field, result);
        }
        results
    }

    /// Assemble the payload for the given snapshots, stamped now.
    pub fn build_payload(&self, form: &FormSnapshot, tracking: &TrackingSnapshot) -> OutboundPayload {
        build_payload(form, tracking, &self.settings.metadata, Utc::now())
    }

    /// Run one full submit attempt.
    pub async fn submit(&mut self) -> SubmitReport {
        let attempt_id = Uuid::new_v4();
        let span = tracing::info_span!("submit", attempt = %attempt_id);
        let mut transitions = Vec::new();
        let outcome = self.run_submit(&mut transitions).instrument(span).await;
        SubmitReport {
            attempt_id,
            transitions,
            outcome,
        }
    }

    async fn run_submit(&mut self, trail: &mut Vec<SubmitState>) -> SubmitOutcome {
        self.transition(SubmitState::Validating, trail);

        let errors: Vec<(Field, String)> = self
            .check_fields()
            .into_iter()
            .filter(|(_, result)| !result.valid)
            .map(|(field, result)| (field, result.message))
            .collect();

        if !errors.is_empty() {
            warn!(invalid_fields = errors.len(), "submission blocked by invalid fields");
            self.view.alert(INVALID_FORM_MESSAGE);
            self.transition(SubmitState::Idle, trail);
            return SubmitOutcome::Rejected { errors };
        }

        self.transition(SubmitState::Submitting, trail);
        self.view.set_submit_enabled(false);
        self.view.set_loading(true);

        let form = capture_form(&self.view.values());
        let tracking = self.tracking.capture();
        let payload = self.build_payload(&form, &tracking);
        if let Ok(json) = serde_json::to_string(&payload) {
            debug!(payload = %json, "payload assembled");
        }

        let delivery = self.transport.deliver(&payload).await;

        self.view.set_loading(false);
        self.view.set_submit_enabled(true);

        let outcome = match delivery {
            Ok(receipt) => {
                info!(status = receipt.status, "payload delivered");
                self.redirect(payload, Some(receipt), trail)
            }
            Err(err) if self.settings.assume_delivered => {
                error!(error = %err, "webhook delivery failed, continuing as delivered");
                self.redirect(payload, None, trail)
            }
            Err(err) => {
                error!(error = %err, "webhook delivery failed");
                self.transition(SubmitState::Failed, trail);
                self.view.alert(SEND_FAILED_MESSAGE);
                SubmitOutcome::Failed {
                    payload,
                    error: err.to_string(),
                }
            }
        };

        self.transition(SubmitState::Idle, trail);
        outcome
    }

    fn redirect(
        &mut self,
        payload: OutboundPayload,
        receipt: Option<TransportReceipt>,
        trail: &mut Vec<SubmitState>,
    ) -> SubmitOutcome {
        self.transition(SubmitState::Success, trail);
        let destination = self.settings.redirect_to.clone();
        info!(%destination, "redirecting");
        self.view.navigate(&destination);
        SubmitOutcome::Redirected {
            destination,
            payload,
            receipt,
        }
    }

    fn transition(&mut self, next: SubmitState, trail: &mut Vec<SubmitState>) {
        debug!(from = %self.state, to = %next, "submit state");
        self.state = next;
        trail.push(next);
    }
}
