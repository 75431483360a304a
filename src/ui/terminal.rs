use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use leadform_common::{Field, FieldValidationResult, FormValues};

use crate::ui::icons::{ARROW, CROSS, WARN};
use crate::view::FormView;

/// `FormView` for the command line.
///
/// The form values come from CLI flags. Field errors and alerts go to stderr, the
/// navigation target to stdout; the loading state is an `indicatif` spinner.
pub struct TerminalView {
    values: FormValues,
    flagged: Vec<(Field, String)>,
    submit_enabled: bool,
    spinner: Option<ProgressBar>,
    alerts: Vec<String>,
    destination: Option<String>,
}

impl TerminalView {
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            flagged: Vec::new(),
            submit_enabled: true,
            spinner: None,
            alerts: Vec::new(),
            destination: None,
        }
    }

    /// Fields currently flagged as invalid, with their messages.
    pub fn flagged(&self) -> &[(Field, String)] {
        &self.flagged
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}

impl FormView for TerminalView {
    fn values(&self) -> FormValues {
        self.values.clone()
    }

    fn set_phone(&mut self, masked: &str) {
        self.values.phone = masked.to_string();
    }

    fn mark_field(&mut self, field: Field, result: &FieldValidationResult) {
        self.flagged.retain(|(f, _)| *f != field);
        if !result.valid {
            eprintln!(
                "  {}{}: {}",
                CROSS,
                style(field).red().bold(),
                result.message
            );
            self.flagged.push((field, result.message.clone()));
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            let spinner = ProgressBar::new_spinner();
            if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner} {msg}")
            {
                spinner.set_style(spinner_style);
            }
            spinner.set_message("Enviando...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(spinner);
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}{}", WARN, style(message).yellow());
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, destination: &str) {
        println!("{}{}", ARROW, style(destination).cyan());
        self.destination = Some(destination.to_string());
    }
}
