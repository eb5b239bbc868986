use super::*;

pub(crate) fn watch(page: &mut Page, config: &UiConfig) -> Vec<ListenerId> {
    [
        ("online", Severity::Success, config.online_message.clone()),
        ("offline", Severity::Warning, config.offline_message.clone()),
    ]
    .into_iter()
    .map(|(event, severity, message)| {
        page.add_event_listener(
            EventTarget::Window,
            event,
            ListenerOptions::default(),
            move |page, _| {
                show_notification(page, &message, severity)?;
                Ok(())
            },
        )
    })
    .collect()
}
