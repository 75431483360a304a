//! Form commands — `leadform mask | validate | payload | submit`.

use anyhow::{Context, Result};
use chrono::Utc;
use console::style;
use tracing::info;

use leadform::common::FormValues;
use leadform::config::LeadformConfig;
use leadform::orchestrator::{SubmissionOrchestrator, SubmitOutcome};
use leadform::payload::{build_payload, capture_form};
use leadform::tracking::{PageContext, PageTrackingSource, TrackingDataSource};
use leadform::transport::WebhookTransport;
use leadform::ui::TerminalView;
use leadform::ui::icons::{CHECK, CROSS};

use super::super::{FormArgs, PageArgs};

pub fn cmd_mask(config: &LeadformConfig, input: &str) {
    println!("{}", config.phone_mask().apply(input));
}

pub fn cmd_validate(config: &LeadformConfig, form: &FormArgs) -> Result<()> {
    let settings = config.submission_settings();
    let values = form_values(config, form);

    let results = settings.validator.validate_all(&values);
    for (field, result) in &results {
        if result.valid {
            println!("{}{}", CHECK, style(field).green());
        } else {
            println!("{}{}: {}", CROSS, style(field).red().bold(), result.message);
        }
    }

    let invalid = results.iter().filter(|(_, r)| !r.valid).count();
    if invalid > 0 {
        anyhow::bail!("{} invalid field(s)", invalid);
    }
    Ok(())
}

pub fn cmd_payload(config: &LeadformConfig, form: &FormArgs, page: &PageArgs) -> Result<()> {
    let settings = config.submission_settings();
    let tracking = PageTrackingSource::new(page_context(page))?;

    let payload = build_payload(
        &capture_form(&form_values(config, form)),
        &tracking.capture(),
        &settings.metadata,
        Utc::now(),
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("Failed to serialize payload")?
    );
    Ok(())
}

pub async fn cmd_submit(config: &LeadformConfig, form: &FormArgs, page: &PageArgs) -> Result<()> {
    let tracking = PageTrackingSource::new(page_context(page))?;
    let endpoint = config.webhook_url();
    let transport = WebhookTransport::new(&endpoint)
        .with_context(|| format!("Cannot submit to webhook {}", endpoint))?;
    info!(endpoint = %transport.endpoint(), "submitting lead");

    let view = TerminalView::new(FormValues {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: String::new(),
        consent: form.consent,
    });
    let mut orchestrator =
        SubmissionOrchestrator::new(view, tracking, transport, config.submission_settings());
    if !form.phone.is_empty() {
        orchestrator.on_phone_input(&form.phone, form.phone.chars().count());
    }

    let report = orchestrator.submit().await;
    match report.outcome {
        SubmitOutcome::Redirected { .. } => Ok(()),
        SubmitOutcome::Rejected { errors } => {
            anyhow::bail!("Submission rejected: {} invalid field(s)", errors.len())
        }
        SubmitOutcome::Failed { error, .. } => {
            anyhow::bail!("Submission failed: {}", error)
        }
    }
}

/// Form values as the page would hold them: the phone goes through the mask.
fn form_values(config: &LeadformConfig, form: &FormArgs) -> FormValues {
    let mask = config.phone_mask();
    let phone = if form.phone.is_empty() {
        mask.initial_value()
    } else {
        mask.apply(&form.phone)
    };
    FormValues {
        name: form.name.clone(),
        email: form.email.clone(),
        phone,
        consent: form.consent,
    }
}

fn page_context(page: &PageArgs) -> PageContext {
    PageContext {
        url: page.page_url.clone(),
        referrer: page.referrer.clone(),
        title: page.title.clone(),
        user_agent: page.user_agent.clone(),
        language: page.language.clone(),
        screen: page.screen,
        viewport: page.viewport,
    }
}
