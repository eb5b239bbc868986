use super::*;

pub(crate) fn attach(page: &mut Page) -> Result<Vec<ListenerId>> {
    let mut ids = Vec::new();
    for anchor in page.query_selector_all(r##"a[href^="#"]"##)? {
        let id = page.add_event_listener(
            EventTarget::Node(anchor),
            "click",
            ListenerOptions::default(),
            move |page, event| {
                event.prevent_default();
                let href = page.attribute(anchor, "href").unwrap_or_default();
                match fragment_target(page, &href) {
                    Some(target) => {
                        page.scroll_into_view(target, ScrollBehavior::Smooth, ScrollBlock::Start)
                    }
                    None => page.trace_behavior_line(format!("[anchor] no target href={href}")),
                }
                Ok(())
            },
        );
        ids.push(id);
    }
    Ok(ids)
}

/// `#plants` resolves to the element with id `plants`; a bare `#` has no target.
fn fragment_target(page: &Page, href: &str) -> Option<NodeId> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    page.element_by_id(id)
}
