use super::*;

const PLANT_PAGE: &str = r##"
<html><head><title>Plants</title></head><body>
  <nav>
    <a id="to-plants" href="#plants">Plants</a>
    <a id="to-nowhere" href="#nowhere">Gone</a>
    <a id="to-top" href="#">Top</a>
    <a id="about" href="/about">About</a>
  </nav>
  <section id="plants"><h2>Your plants</h2></section>
</body></html>
"##;

const GUARDED_PAGE: &str = r##"
<html><head></head><body>
  <a id="jump" href="#add">Add</a>
  <form id="add" action="/plants" method="post">
    <input id="name" required>
    <button id="save">Save</button>
  </form>
</body></html>
"##;

#[test]
fn in_page_anchor_scrolls_smoothly_instead_of_navigating() -> Result<()> {
    let mut page = boot(PLANT_PAGE)?;
    page.click("#to-plants")?;

    let scrolls = page.take_scroll_requests();
    assert_eq!(scrolls.len(), 1);
    assert_eq!(scrolls[0].target, select(&page, "#plants")?);
    assert_eq!(scrolls[0].behavior, ScrollBehavior::Smooth);
    assert_eq!(scrolls[0].block, ScrollBlock::Start);
    assert!(page.take_navigations().is_empty());
    Ok(())
}

#[test]
fn fragment_without_target_is_swallowed() -> Result<()> {
    let mut page = boot(PLANT_PAGE)?;
    page.click("#to-nowhere")?;
    page.click("#to-top")?;
    assert!(page.take_scroll_requests().is_empty());
    assert!(page.take_navigations().is_empty());
    Ok(())
}

#[test]
fn regular_links_still_navigate() -> Result<()> {
    let mut page = boot(PLANT_PAGE)?;
    page.click("#about")?;
    assert_eq!(page.take_navigations(), vec!["/about"]);
    assert!(page.take_scroll_requests().is_empty());
    Ok(())
}

#[test]
fn anchors_behave_natively_before_the_page_is_ready() -> Result<()> {
    let mut page = Page::from_html(PLANT_PAGE)?;
    UiBehaviors::new(UiConfig::default())?.install(&mut page)?;
    page.click("#to-plants")?;
    assert_eq!(page.take_navigations(), vec!["#plants"]);
    assert!(page.take_scroll_requests().is_empty());
    Ok(())
}

#[test]
fn stylesheet_is_installed_once_into_head() -> Result<()> {
    let mut page = boot(PLANT_PAGE)?;
    UiBehaviors::new(UiConfig::default())?.install(&mut page)?;

    page.assert_count("style", 1)?;
    let style = select(&page, "head > style")?;
    assert_eq!(page.attribute(style, "id").as_deref(), Some(STYLESHEET_ID));
    assert_eq!(page.text(style), STYLESHEET);
    Ok(())
}

#[test]
fn stylesheet_falls_back_to_the_document_without_head_or_body() -> Result<()> {
    let page = boot("<p>bare</p>")?;
    let style = select(&page, "style")?;
    assert_eq!(page.parent(style), Some(page.document()));
    Ok(())
}

#[test]
fn dom_content_loaded_wires_behaviors_only_once() -> Result<()> {
    let mut page = boot(GUARDED_PAGE)?;
    let form = EventTarget::Node(select(&page, "#add")?);
    assert_eq!(page.listener_count(form, "submit"), 1);

    page.load_dom_content()?;
    assert_eq!(page.listener_count(form, "submit"), 1);
    assert_eq!(page.listener_count(EventTarget::Node(page.document()), "DOMContentLoaded"), 0);
    Ok(())
}

#[test]
fn uninstall_detaches_every_listener_the_install_wired() -> Result<()> {
    let mut page = Page::from_html(GUARDED_PAGE)?;
    let behaviors = UiBehaviors::new(UiConfig::default())?;
    let registration = behaviors.install(&mut page)?;
    page.load_dom_content()?;

    // online, offline, ready, validation submit, anchor click
    assert_eq!(registration.len(), 5);
    assert_eq!(behaviors.uninstall(&mut page, registration), 4);

    page.go_offline()?;
    page.assert_missing(".alert")?;
    page.click("#jump")?;
    assert_eq!(page.take_navigations(), vec!["#add"]);
    page.click("#save")?;
    assert_eq!(page.take_form_submissions().len(), 1);
    page.assert_class("#name", "input-error", false)?;
    page.assert_exists("style")?;
    Ok(())
}

#[test]
fn uninstall_before_ready_prevents_the_deferred_wiring() -> Result<()> {
    let mut page = Page::from_html(GUARDED_PAGE)?;
    let behaviors = UiBehaviors::new(UiConfig::default())?;
    let registration = behaviors.install(&mut page)?;
    assert_eq!(behaviors.uninstall(&mut page, registration), 3);

    page.load_dom_content()?;
    page.click("#save")?;
    assert_eq!(page.take_form_submissions().len(), 1);
    Ok(())
}

#[test]
fn invalid_config_is_rejected_before_install() {
    let config = UiConfig::default().with_card_selector(".plant-card,");
    assert!(matches!(UiBehaviors::new(config), Err(Error::Config(_))));

    let config = UiConfig::default().with_fade_ms(-1);
    assert!(matches!(boot_with("<p>x</p>", config), Err(Error::Config(_))));
}

#[test]
fn behavior_trace_lines_describe_the_boot() -> Result<()> {
    let mut page = Page::from_html(GUARDED_PAGE)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_events(false);
    UiBehaviors::new(UiConfig::default())?.install(&mut page)?;
    page.load_dom_content()?;

    let logs = page.take_trace_logs();
    for expected in [
        "[behaviors] stylesheet id=plant-watering-styles",
        "[behaviors] installed listeners=3",
        "[flash] scheduled count=0 delay_ms=5000",
        "[cards] animated count=0",
        "[confirm] guarded forms=0",
        "[behaviors] ready listeners=2",
    ] {
        assert!(logs.iter().any(|line| line == expected), "missing {expected}: {logs:?}");
    }
    Ok(())
}
