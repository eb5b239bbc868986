use std::str::FromStr;

use super::*;

const SLIDE_IN_MS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Icon-font glyph name shown in front of the message.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
            Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(Error::Runtime(format!("unknown notification severity: {other}"))),
        }
    }
}

/// Shows a toast in the top-right corner of the page and returns its node.
///
/// The toast carries the classes `alert alert-<severity>`, a severity icon,
/// the message as plain text and a close button that removes it at once.
/// After the configured display time it fades out and is detached.
pub fn show_notification(page: &mut Page, message: &str, severity: Severity) -> Result<NodeId> {
    let config = page.shared_ui_config();

    let toast = page.create_element("div");
    page.set_attribute(toast, "class", &format!("alert alert-{severity}"))?;
    for (property, value) in [
        ("position", "fixed"),
        ("top", "20px"),
        ("right", "20px"),
        ("zIndex", "9999"),
        ("minWidth", "300px"),
    ] {
        page.set_style(toast, property, value)?;
    }
    page.set_style(
        toast,
        "animation",
        &format!("slideInRight {} ease-out", css_seconds(SLIDE_IN_MS)),
    )?;

    let icon = page.create_element("i");
    page.set_attribute(icon, "class", &format!("fas fa-{}", severity.icon()))?;
    page.append_child(toast, icon)?;

    let text = page.create_element("span");
    page.set_text(text, message)?;
    page.append_child(toast, text)?;

    let close = page.create_element("button");
    page.set_attribute(close, "type", "button")?;
    page.set_attribute(close, "class", "alert-close")?;
    let close_icon = page.create_element("i");
    page.set_attribute(close_icon, "class", "fas fa-times")?;
    page.append_child(close, close_icon)?;
    page.append_child(toast, close)?;
    page.add_event_listener(
        EventTarget::Node(close),
        "click",
        ListenerOptions::default(),
        move |page, _| page.remove_node(toast),
    );

    let parent = page.body().unwrap_or_else(|| page.document());
    page.append_child(parent, toast)?;

    schedule_fade_out(
        page,
        toast,
        config.display_ms,
        config.fade_ms,
        "translateX(20px)",
        ("notification-hide", "notification-remove"),
    );
    page.trace_behavior_line(format!(
        "[notification] show severity={severity} message={message:?}"
    ));
    Ok(toast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_case_insensitively_and_defaults_to_info() -> Result<()> {
        assert_eq!("Warning".parse::<Severity>()?, Severity::Warning);
        assert_eq!(" error ".parse::<Severity>()?, Severity::Error);
        assert_eq!(Severity::default(), Severity::Info);
        assert!("fatal".parse::<Severity>().is_err());
        Ok(())
    }

    #[test]
    fn every_severity_has_its_own_icon() {
        let icons = [
            Severity::Success,
            Severity::Error,
            Severity::Warning,
            Severity::Info,
        ]
        .map(Severity::icon);
        assert_eq!(
            icons,
            [
                "check-circle",
                "exclamation-circle",
                "exclamation-triangle",
                "info-circle"
            ]
        );
    }
}
