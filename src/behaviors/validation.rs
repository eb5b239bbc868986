use super::*;

/// Fields of one form whose clearing `input` listener has not fired yet.
type PendingClears = Rc<RefCell<HashSet<NodeId>>>;

pub(crate) fn attach(page: &mut Page, config: &Rc<UiConfig>) -> Result<Vec<ListenerId>> {
    let mut ids = Vec::new();
    for form in page.query_selector_all("form")? {
        let config = Rc::clone(config);
        let awaiting_input = PendingClears::default();
        let id = page.add_event_listener(
            EventTarget::Node(form),
            "submit",
            ListenerOptions::default(),
            move |page, event| check_required_fields(page, form, event, &config, &awaiting_input),
        );
        ids.push(id);
    }
    Ok(ids)
}

fn check_required_fields(
    page: &mut Page,
    form: NodeId,
    event: &mut EventState,
    config: &UiConfig,
    awaiting_input: &PendingClears,
) -> Result<()> {
    let mut failed = 0usize;
    for field in page.query_selector_all_from(form, "[required]")? {
        if !page.value(field)?.trim().is_empty() {
            continue;
        }
        failed += 1;
        page.add_class(field, &config.error_class)?;
        if !awaiting_input.borrow_mut().insert(field) {
            continue;
        }
        let error_class = config.error_class.clone();
        let awaiting_input = Rc::clone(awaiting_input);
        page.add_event_listener(
            EventTarget::Node(field),
            "input",
            ListenerOptions::once(),
            move |page, _| {
                awaiting_input.borrow_mut().remove(&field);
                page.remove_class(field, &error_class)
            },
        );
    }

    if failed == 0 {
        return Ok(());
    }
    event.prevent_default();
    let label = page.trace_node_label(form);
    page.trace_behavior_line(format!("[validation] form={label} failed={failed}"));
    show_notification(page, &config.validation_message, Severity::Error)?;
    Ok(())
}
