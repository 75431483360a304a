use leadform_common::{Field, FieldValidationResult, FormValues};

/// Everything the orchestrator reads from or renders to the form.
///
/// The page implementation toggles CSS classes and the button's `disabled`
/// attribute; the CLI renders to the terminal (`ui::TerminalView`).
pub trait FormView {
    /// Current values of the four controls.
    fn values(&self) -> FormValues;

    /// Replace the phone control's text, e.g. after re-masking.
    fn set_phone(&mut self, masked: &str);

    /// Set or clear the error flag on a control.
    fn mark_field(&mut self, field: Field, result: &FieldValidationResult);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_loading(&mut self, loading: bool);

    /// Blocking, user-facing message.
    fn alert(&mut self, message: &str);

    /// Leave the form for `destination`.
    fn navigate(&mut self, destination: &str);
}
