use super::*;

pub(crate) fn attach(page: &mut Page, config: &UiConfig) -> Result<Vec<ListenerId>> {
    let Some(input) = page.element_by_id(&config.image_input_id) else {
        return Ok(Vec::new());
    };
    let caption = config.preview_caption.clone();
    let id = page.add_event_listener(
        EventTarget::Node(input),
        "change",
        ListenerOptions::default(),
        move |page, _| {
            let Some(file) = page.files(input)?.into_iter().next() else {
                return Ok(());
            };
            if !file.is_image() {
                page.trace_behavior_line(format!(
                    "[preview] skipped name={} type={}",
                    file.name, file.mime_type
                ));
                return Ok(());
            }
            let caption = caption.clone();
            page.read_as_data_url(file, move |page, url| show_preview(page, input, &url, &caption));
            Ok(())
        },
    );
    Ok(vec![id])
}

fn show_preview(page: &mut Page, input: NodeId, url: &str, caption: &str) -> Result<()> {
    let Some(parent) = page.parent(input) else {
        return Ok(());
    };
    let preview = match page.query_selector_from(parent, ".image-preview")? {
        Some(existing) => existing,
        None => build_preview(page, input, caption)?,
    };
    if let Some(image) = page.query_selector_from(preview, "img")? {
        page.set_attribute(image, "src", url)?;
    }
    page.set_style(preview, "display", "block")?;
    page.trace_behavior_line(format!("[preview] updated bytes={}", url.len()));
    Ok(())
}

fn build_preview(page: &mut Page, input: NodeId, caption: &str) -> Result<NodeId> {
    let preview = page.create_element("div");
    page.set_attribute(preview, "class", "image-preview")?;

    let image = page.create_element("img");
    page.set_attribute(image, "src", "")?;
    page.set_attribute(image, "alt", "Preview")?;
    page.append_child(preview, image)?;

    let text = page.create_element("p");
    page.set_text(text, caption)?;
    page.append_child(preview, text)?;

    page.insert_after(input, preview)?;
    Ok(preview)
}
