use super::*;

fn record(
    page: &mut Page,
    target: EventTarget,
    event: &str,
    options: ListenerOptions,
    label: &str,
    log: &Log,
) -> ListenerId {
    let log = Rc::clone(log);
    let label = label.to_string();
    page.add_event_listener(target, event, options, move |_, _| {
        log.borrow_mut().push(label.clone());
        Ok(())
    })
}

#[test]
fn dispatch_runs_capture_target_then_bubble_up_to_window() -> Result<()> {
    let mut page = Page::from_html("<div id='outer'><button id='inner' type='button'>x</button></div>")?;
    let outer = EventTarget::Node(select(&page, "#outer")?);
    let inner = EventTarget::Node(select(&page, "#inner")?);
    let log = new_log();

    record(&mut page, EventTarget::Window, "click", ListenerOptions::default(), "window-bubble", &log);
    record(&mut page, outer, "click", ListenerOptions::default(), "outer-bubble", &log);
    record(&mut page, inner, "click", ListenerOptions::default(), "target", &log);
    record(&mut page, outer, "click", ListenerOptions::capture(), "outer-capture", &log);
    record(&mut page, EventTarget::Window, "click", ListenerOptions::capture(), "window-capture", &log);

    page.click("#inner")?;
    assert_eq!(
        logged(&log),
        vec![
            "window-capture",
            "outer-capture",
            "target",
            "outer-bubble",
            "window-bubble"
        ]
    );
    Ok(())
}

#[test]
fn once_listener_runs_a_single_time() -> Result<()> {
    let mut page = Page::from_html("<button id='b' type='button'>x</button>")?;
    let button = EventTarget::Node(select(&page, "#b")?);
    let log = new_log();
    let id = record(&mut page, button, "click", ListenerOptions::once(), "once", &log);

    page.click("#b")?;
    page.click("#b")?;
    assert_eq!(logged(&log), vec!["once"]);
    assert_eq!(page.listener_count(button, "click"), 0);
    assert!(!page.remove_event_listener(id));
    Ok(())
}

#[test]
fn stop_propagation_keeps_event_from_ancestors() -> Result<()> {
    let mut page = Page::from_html("<div id='outer'><span id='inner'>x</span></div>")?;
    let outer = EventTarget::Node(select(&page, "#outer")?);
    let inner = EventTarget::Node(select(&page, "#inner")?);
    let log = new_log();
    record(&mut page, outer, "ping", ListenerOptions::default(), "outer", &log);
    page.add_event_listener(inner, "ping", ListenerOptions::default(), |_, event| {
        event.stop_propagation();
        Ok(())
    });
    record(&mut page, inner, "ping", ListenerOptions::default(), "inner-second", &log);

    let outcome = page.dispatch_event(inner, "ping")?;
    assert!(outcome.propagation_stopped);
    assert_eq!(logged(&log), vec!["inner-second"]);
    Ok(())
}

#[test]
fn stop_immediate_propagation_skips_remaining_listeners() -> Result<()> {
    let mut page = Page::from_html("<span id='s'>x</span>")?;
    let span = EventTarget::Node(select(&page, "#s")?);
    let log = new_log();
    page.add_event_listener(span, "ping", ListenerOptions::default(), |_, event| {
        event.stop_immediate_propagation();
        Ok(())
    });
    record(&mut page, span, "ping", ListenerOptions::default(), "skipped", &log);

    page.dispatch("#s", "ping")?;
    assert!(logged(&log).is_empty());
    Ok(())
}

#[test]
fn listener_removed_during_dispatch_does_not_run() -> Result<()> {
    let mut page = Page::from_html("<span id='s'>x</span>")?;
    let span = EventTarget::Node(select(&page, "#s")?);
    let log = new_log();
    let victim: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

    let victim_handle = Rc::clone(&victim);
    page.add_event_listener(span, "ping", ListenerOptions::default(), move |page, _| {
        if let Some(id) = victim_handle.get() {
            page.remove_event_listener(id);
        }
        Ok(())
    });
    victim.set(Some(record(&mut page, span, "ping", ListenerOptions::default(), "victim", &log)));

    page.dispatch("#s", "ping")?;
    assert!(logged(&log).is_empty());
    Ok(())
}

#[test]
fn prevent_default_is_visible_to_later_listeners() -> Result<()> {
    let mut page = Page::from_html("<a id='a' href='/away'>x</a>")?;
    let anchor = EventTarget::Node(select(&page, "#a")?);
    let seen: Rc<Cell<bool>> = Rc::new(Cell::new(false));
    page.add_event_listener(anchor, "click", ListenerOptions::default(), |_, event| {
        event.prevent_default();
        Ok(())
    });
    let seen_handle = Rc::clone(&seen);
    page.add_event_listener(EventTarget::Window, "click", ListenerOptions::default(), move |_, event| {
        seen_handle.set(event.default_prevented());
        Ok(())
    });

    page.click("#a")?;
    assert!(seen.get());
    assert!(page.take_navigations().is_empty());
    Ok(())
}

#[test]
fn detached_nodes_do_not_reach_the_window() -> Result<()> {
    let mut page = Page::from_html("<p>x</p>")?;
    let node = page.create_element("div");
    let log = new_log();
    record(&mut page, EventTarget::Window, "ping", ListenerOptions::default(), "window", &log);
    record(&mut page, EventTarget::Node(node), "ping", ListenerOptions::default(), "node", &log);

    page.dispatch_event(EventTarget::Node(node), "ping")?;
    assert_eq!(logged(&log), vec!["node"]);
    Ok(())
}

#[test]
fn dom_content_loaded_bubbles_from_document_to_window() -> Result<()> {
    let mut page = Page::from_html("<p>x</p>")?;
    let document = page.document();
    let log = new_log();
    let log_handle = Rc::clone(&log);
    page.add_event_listener(
        EventTarget::Window,
        "DOMContentLoaded",
        ListenerOptions::default(),
        move |_, event| {
            log_handle.borrow_mut().push(format!("{:?}", event.target()));
            Ok(())
        },
    );

    page.load_dom_content()?;
    assert_eq!(logged(&log), vec![format!("{:?}", EventTarget::Node(document))]);
    Ok(())
}

#[test]
fn handler_errors_propagate_to_the_caller() -> Result<()> {
    let mut page = Page::from_html("<button id='b' type='button'>x</button>")?;
    let button = EventTarget::Node(select(&page, "#b")?);
    page.add_event_listener(button, "click", ListenerOptions::default(), |_, _| {
        Err(Error::Runtime("handler failed".into()))
    });
    assert_eq!(page.click("#b"), Err(Error::Runtime("handler failed".into())));
    Ok(())
}

#[test]
fn event_trace_lines_describe_each_phase() -> Result<()> {
    let mut page = Page::from_html("<button id='b' type='button'>x</button>")?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    let button = EventTarget::Node(select(&page, "#b")?);
    page.add_event_listener(button, "click", ListenerOptions::default(), |_, _| Ok(()));
    page.click("#b")?;

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.starts_with("[event] listen click target=#b")));
    assert!(logs
        .iter()
        .any(|line| line == "[event] click target=#b current=#b phase=bubble default_prevented=false"));
    assert!(logs.iter().any(|line| {
        line.starts_with("[event] done click target=#b current=window outcome=completed")
    }));
    Ok(())
}
