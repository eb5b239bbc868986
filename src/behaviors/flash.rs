use super::*;

/// Schedules dismissal of the alerts present when the page becomes ready.
pub(crate) fn dismiss_existing(page: &mut Page, config: &UiConfig) -> Result<usize> {
    let alerts = page.query_selector_all(&config.alert_selector)?;
    for alert in &alerts {
        schedule_fade_out(
            page,
            *alert,
            config.display_ms,
            config.fade_ms,
            "translateY(-20px)",
            ("flash-hide", "flash-remove"),
        );
    }
    page.trace_behavior_line(format!(
        "[flash] scheduled count={} delay_ms={}",
        alerts.len(),
        config.display_ms
    ));
    Ok(alerts.len())
}
