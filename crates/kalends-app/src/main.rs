use std::io;
use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use clap::Parser as _;
use kalends_core::config::{Settings, load_config};
use kalends_rfc::rfc::ical::core::{Calendar, ComponentLike, RRuleSlot, VTimezone};
use kalends_rfc::rfc::ical::expand::SlotExpander;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let settings = load_config()?;

    tracing::debug!(config = ?settings, "Configuration loaded");

    let level = cli.log.as_deref().unwrap_or(settings.logging.level.as_str());
    if let Ok(filter) = EnvFilter::try_new(level) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter");
        }
    } else {
        tracing::warn!(level = %level, "Invalid log level, keeping warn");
    }

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Inspect { file } => inspect(&file, &mut stdout),
        Command::Slots { file, until, json } => {
            let expander = SlotExpander::with_horizon(settings.recurrence.horizon());
            slots(&file, &expander, until, json, &mut stdout)
        }
        Command::New {
            summary,
            start,
            end,
            uid,
        } => new_calendar(&settings, &summary, start, end, uid, &mut stdout),
    }
}

fn read_calendar(path: &Path) -> Result<Calendar> {
    Calendar::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn inspect<W: io::Write>(path: &Path, out: &mut W) -> Result<()> {
    let calendar = read_calendar(path)?;

    writeln!(out, "Product: {}", calendar.product_id().unwrap_or_default())?;
    writeln!(out, "Vendor: {}", calendar.prod_vendor())?;
    if let Some(name) = calendar.name() {
        writeln!(out, "Name: {name}")?;
    }
    if let Some(tz) = calendar.time_zone().and_then(VTimezone::value) {
        writeln!(out, "Timezone: {tz}")?;
    }
    writeln!(out, "Components: {}", calendar.components().len())?;

    for event in calendar.events() {
        let start = match event.start_at() {
            Ok(t) => t.to_rfc3339(),
            Err(_) => "?".to_string(),
        };
        writeln!(
            out,
            "- {} {} ({})",
            start,
            event.summary().unwrap_or_default(),
            event.uid().unwrap_or_default()
        )?;
        if let Some(rule) = event.rrule() {
            writeln!(out, "  RRULE {rule}")?;
        }
        if let Some(link) = event.link_meeting() {
            writeln!(out, "  Join {link}")?;
        }
        if event.is_status_cancelled() {
            writeln!(out, "  Cancelled")?;
        }
    }
    Ok(())
}

fn slots<W: io::Write>(
    path: &Path,
    expander: &SlotExpander,
    until: Option<DateTime<Utc>>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let calendar = read_calendar(path)?;

    let slots: Vec<RRuleSlot> = calendar
        .events()
        .iter()
        .flat_map(|event| event.get_slots_with(expander, until))
        .collect();

    tracing::info!(count = slots.len(), "Expanded recurring events");

    if json {
        serde_json::to_writer_pretty(&mut *out, &slots)?;
        writeln!(out)?;
    } else {
        for slot in &slots {
            writeln!(
                out,
                "{}\t{}\t{}",
                slot.start_at.to_rfc3339(),
                slot.end_at.to_rfc3339(),
                slot.event_id
            )?;
        }
    }
    Ok(())
}

fn new_calendar<W: io::Write>(
    settings: &Settings,
    summary: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    uid: Option<String>,
    out: &mut W,
) -> Result<()> {
    anyhow::ensure!(end >= start, "Event end {end} is before its start {start}");

    let uid = uid.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut calendar = Calendar::new_for(settings.calendar.product_id.as_str());
    calendar
        .add_event(uid)
        .context("Failed to add event to calendar")?
        .set_dtstamp(Utc::now())
        .set_summary(summary)
        .set_start_at(start)
        .set_end_at(end);

    calendar.serialize_to(out)?;
    Ok(())
}
