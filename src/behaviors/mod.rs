use super::*;

mod anchors;
mod cards;
mod confirm;
mod connectivity;
pub(crate) mod debounce;
mod flash;
mod image_preview;
pub(crate) mod notifications;
mod validation;

type ListenerLedger = Rc<RefCell<Vec<ListenerId>>>;

/// The page behaviors of the plant watering UI, wired onto a [`Page`] at once.
#[derive(Debug, Clone)]
pub struct UiBehaviors {
    config: Rc<UiConfig>,
}

/// Listener ids owned by one [`UiBehaviors::install`] call.
///
/// Listeners attached when the page becomes ready are added here too, so
/// [`UiBehaviors::uninstall`] detaches everything the install wired.
#[derive(Debug, Clone)]
pub struct Registration {
    listeners: ListenerLedger,
}

impl Registration {
    pub fn listener_ids(&self) -> Vec<ListenerId> {
        self.listeners.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl UiBehaviors {
    pub fn new(config: UiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Rc::new(config),
        })
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Installs the stylesheet, subscribes to connectivity changes and defers
    /// the document behaviors until `DOMContentLoaded`.
    pub fn install(&self, page: &mut Page) -> Result<Registration> {
        page.set_ui_config(Rc::clone(&self.config));
        install_stylesheet(page)?;

        let ledger: ListenerLedger = Rc::default();
        let connectivity_ids = connectivity::watch(page, &self.config);
        ledger.borrow_mut().extend(connectivity_ids);

        let document = page.document();
        let config = Rc::clone(&self.config);
        let ready_ledger = Rc::clone(&ledger);
        let ready_id = page.add_event_listener(
            EventTarget::Node(document),
            "DOMContentLoaded",
            ListenerOptions::once(),
            move |page, _| on_page_ready(page, &config, &ready_ledger),
        );
        ledger.borrow_mut().push(ready_id);

        page.trace_behavior_line(format!(
            "[behaviors] installed listeners={}",
            ledger.borrow().len()
        ));
        Ok(Registration { listeners: ledger })
    }

    /// Detaches every listener of `registration` that is still attached and
    /// returns how many were removed. The stylesheet and scheduled timers stay.
    pub fn uninstall(&self, page: &mut Page, registration: Registration) -> usize {
        let ids = std::mem::take(&mut *registration.listeners.borrow_mut());
        let removed = ids
            .into_iter()
            .filter(|id| page.remove_event_listener(*id))
            .count();
        page.trace_behavior_line(format!("[behaviors] uninstalled removed={removed}"));
        removed
    }
}

/// Parses `html`, installs the default behaviors and fires `DOMContentLoaded`.
pub fn boot(html: &str) -> Result<Page> {
    boot_with(html, UiConfig::default())
}

pub fn boot_with(html: &str, config: UiConfig) -> Result<Page> {
    let mut page = Page::from_html(html)?;
    UiBehaviors::new(config)?.install(&mut page)?;
    page.load_dom_content()?;
    Ok(page)
}

fn on_page_ready(page: &mut Page, config: &Rc<UiConfig>, ledger: &ListenerLedger) -> Result<()> {
    flash::dismiss_existing(page, config)?;
    cards::reveal(page, config)?;

    let mut ids = confirm::guard_forms(page, config)?;
    ids.extend(image_preview::attach(page, config)?);
    ids.extend(validation::attach(page, config)?);
    ids.extend(anchors::attach(page)?);

    page.trace_behavior_line(format!("[behaviors] ready listeners={}", ids.len()));
    ledger.borrow_mut().extend(ids);
    Ok(())
}

/// Adds the behavior stylesheet to `head` (falling back to `body`, then the
/// document). Returns `false` when it is already present.
pub(crate) fn install_stylesheet(page: &mut Page) -> Result<bool> {
    if page.element_by_id(STYLESHEET_ID).is_some() {
        return Ok(false);
    }
    let parent = page
        .head()
        .or_else(|| page.body())
        .unwrap_or_else(|| page.document());
    let style = page.create_element("style");
    page.set_attribute(style, "id", STYLESHEET_ID)?;
    page.set_text(style, STYLESHEET)?;
    page.append_child(parent, style)?;
    page.trace_behavior_line(format!("[behaviors] stylesheet id={STYLESHEET_ID}"));
    Ok(true)
}

/// Hides `node` after `delay_ms` by applying `opacity: 0` and `transform`,
/// then detaches it `fade_ms` later. Both steps tolerate a node that is
/// already gone.
pub(crate) fn schedule_fade_out(
    page: &mut Page,
    node: NodeId,
    delay_ms: i64,
    fade_ms: i64,
    transform: &'static str,
    labels: (&'static str, &'static str),
) -> TimerId {
    let (hide_label, remove_label) = labels;
    page.set_timeout(delay_ms, hide_label, move |page| {
        if !page.is_connected(node) {
            return Ok(());
        }
        page.set_style(node, "opacity", "0")?;
        page.set_style(node, "transform", transform)?;
        page.set_timeout(fade_ms, remove_label, move |page| page.remove_node(node));
        Ok(())
    })
}
