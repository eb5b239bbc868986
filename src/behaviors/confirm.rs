use fancy_regex::Regex;

use super::*;

// Single-quoted argument of an inline `confirm('...')` call; `\'` may appear inside.
const LEGACY_CONFIRM_PATTERN: &str = r"confirm\(\s*'((?:[^'\\]|\\.)+?)'\s*\)";

pub(crate) fn guard_forms(page: &mut Page, config: &UiConfig) -> Result<Vec<ListenerId>> {
    let mut ids = Vec::new();
    for form in page.query_selector_all("form")? {
        let Some(message) = confirm_message(page, form, config)? else {
            continue;
        };
        let id = page.add_event_listener(
            EventTarget::Node(form),
            "submit",
            ListenerOptions::default(),
            move |page, event| {
                if !page.confirm(&message) {
                    event.prevent_default();
                }
                Ok(())
            },
        );
        ids.push(id);
    }
    page.trace_behavior_line(format!("[confirm] guarded forms={}", ids.len()));
    Ok(ids)
}

/// The confirmation text of `form`: the configured attribute when it is set
/// and non-empty, otherwise the message of a legacy inline `onsubmit` handler.
fn confirm_message(page: &Page, form: NodeId, config: &UiConfig) -> Result<Option<String>> {
    if let Some(message) = page.attribute(form, &config.confirm_attribute) {
        if !message.is_empty() {
            return Ok(Some(message));
        }
    }
    match page.attribute(form, "onsubmit") {
        Some(handler) => legacy_confirm_message(&handler),
        None => Ok(None),
    }
}

pub(crate) fn legacy_confirm_message(handler: &str) -> Result<Option<String>> {
    let regex = Regex::new(LEGACY_CONFIRM_PATTERN)
        .map_err(|err| Error::Runtime(format!("invalid confirm pattern: {err}")))?;
    let captures = regex
        .captures(handler)
        .map_err(|err| Error::Runtime(format!("confirm pattern failed on {handler:?}: {err}")))?;
    Ok(captures
        .and_then(|captures| captures.get(1))
        .map(|message| message.as_str().replace("\\'", "'")))
}
