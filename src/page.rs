use super::*;

mod actions;
mod assertions;
mod dispatch;
mod timers;

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) behaviors: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            behaviors: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

/// One loaded page view: the document, its listeners, a virtual clock and the
/// mocked browser surfaces (confirm dialog, file reader, scrolling, network).
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) platform_mocks: PlatformMockState,
    pub(crate) trace: TraceState,
    pub(crate) ui_config: Rc<UiConfig>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("now_ms", &self.scheduler.now_ms)
            .field("nodes", &self.dom.nodes.len())
            .field("pending_timers", &self.scheduler.task_queue.len())
            .field("online", &self.platform_mocks.online)
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            platform_mocks: PlatformMockState::default(),
            trace: TraceState::default(),
            ui_config: Rc::new(UiConfig::default()),
        })
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace.logs).into()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace.timers = enabled;
    }

    pub fn set_trace_behaviors(&mut self, enabled: bool) {
        self.trace.behaviors = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace.log_limit = max_entries;
        while self.trace.logs.len() > self.trace.log_limit {
            self.trace.logs.pop_front();
        }
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    /// The configuration behaviors on this page read; set by [`UiBehaviors::install`].
    pub fn ui_config(&self) -> &UiConfig {
        &self.ui_config
    }

    pub(crate) fn shared_ui_config(&self) -> Rc<UiConfig> {
        Rc::clone(&self.ui_config)
    }

    pub(crate) fn set_ui_config(&mut self, config: Rc<UiConfig>) {
        self.ui_config = config;
    }

    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.confirm_responses.push_back(accepted);
    }

    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.default_confirm_response = accepted;
    }

    pub fn take_confirm_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.confirm_messages)
    }

    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.platform_mocks.scroll_requests)
    }

    pub fn take_form_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.platform_mocks.submissions)
    }

    /// Hrefs of anchor clicks whose default action was not prevented.
    pub fn take_navigations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.navigations)
    }

    pub fn is_online(&self) -> bool {
        self.platform_mocks.online
    }

    /// Restores connectivity and fires `online` on the window. No event fires
    /// when the page is already online.
    pub fn go_online(&mut self) -> Result<()> {
        if self.platform_mocks.online {
            return Ok(());
        }
        self.platform_mocks.online = true;
        self.dispatch_event(EventTarget::Window, "online")?;
        Ok(())
    }

    pub fn go_offline(&mut self) -> Result<()> {
        if !self.platform_mocks.online {
            return Ok(());
        }
        self.platform_mocks.online = false;
        self.dispatch_event(EventTarget::Window, "offline")?;
        Ok(())
    }

    /// Shows a blocking confirmation prompt. Answers come from the queued
    /// responses first, then from the default response.
    pub fn confirm(&mut self, message: &str) -> bool {
        self.platform_mocks
            .confirm_messages
            .push(message.to_string());
        let accepted = self
            .platform_mocks
            .confirm_responses
            .pop_front()
            .unwrap_or(self.platform_mocks.default_confirm_response);
        self.trace_behavior_line(format!(
            "[confirm] message={message:?} accepted={accepted}"
        ));
        accepted
    }

    pub fn scroll_into_view(&mut self, target: NodeId, behavior: ScrollBehavior, block: ScrollBlock) {
        let label = self.trace_node_label(target);
        self.trace_behavior_line(format!(
            "[scroll] target={label} behavior={behavior:?} block={block:?}"
        ));
        self.platform_mocks.scroll_requests.push(ScrollRequest {
            target,
            behavior,
            block,
        });
    }

    /// Reads `file` asynchronously. `on_load` receives the data URL on the next
    /// timer turn; an unreadable file never calls it.
    pub fn read_as_data_url<F>(&mut self, file: MockFile, on_load: F) -> TimerId
    where
        F: FnOnce(&mut Page, String) -> Result<()> + 'static,
    {
        self.set_timeout(0, "file-reader", move |page| {
            if !file.readable {
                page.trace_behavior_line(format!("[file] read_error name={}", file.name));
                return Ok(());
            }
            let url = file.to_data_url();
            page.trace_behavior_line(format!(
                "[file] loaded name={} bytes={}",
                file.name,
                file.size()
            ));
            on_load(page, url)
        })
    }

    pub fn document(&self) -> NodeId {
        self.dom.root
    }

    pub fn body(&self) -> Option<NodeId> {
        self.dom.body()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.dom.head()
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    pub fn query_selector_from(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector_from(root, selector)
    }

    pub fn query_selector_all_from(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all_from(root, selector)
    }

    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool> {
        self.dom.matches_selector(node, selector)
    }

    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.dom.closest(node, selector)
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.parent(node)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.dom.tag_name(node)
    }

    pub fn text(&self, node: NodeId) -> String {
        self.dom.text_content(node)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.dom.attr(node, name)
    }

    pub fn style(&self, node: NodeId, property: &str) -> Result<String> {
        self.dom.style_get(node, property)
    }

    pub fn has_class(&self, node: NodeId, class_name: &str) -> Result<bool> {
        self.dom.class_contains(node, class_name)
    }

    pub fn value(&self, node: NodeId) -> Result<String> {
        self.dom.value(node)
    }

    pub fn is_required(&self, node: NodeId) -> bool {
        self.dom.required(node)
    }

    pub fn files(&self, node: NodeId) -> Result<Vec<MockFile>> {
        self.dom.files(node)
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.dom.is_connected(node)
    }

    pub fn inner_html(&self, node: NodeId) -> Result<String> {
        self.dom.inner_html(node)
    }

    /// Creates a detached element; attach it with [`Page::append_child`] or
    /// [`Page::insert_after`].
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.dom.create_detached_element(tag_name)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.dom.set_attr(node, name, value)
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.dom.remove_attr(node, name)
    }

    /// Sets one inline style property. Accepts `zIndex` or `z-index`; an empty
    /// value clears the property.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        self.dom.style_set(node, property, value)
    }

    pub fn add_class(&mut self, node: NodeId, class_name: &str) -> Result<()> {
        self.dom.class_add(node, class_name)
    }

    pub fn remove_class(&mut self, node: NodeId, class_name: &str) -> Result<()> {
        self.dom.class_remove(node, class_name)
    }

    pub fn toggle_class(&mut self, node: NodeId, class_name: &str) -> Result<bool> {
        if self.dom.class_contains(node, class_name)? {
            self.dom.class_remove(node, class_name)?;
            Ok(false)
        } else {
            self.dom.class_add(node, class_name)?;
            Ok(true)
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.dom.set_text_content(node, text)
    }

    pub fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<()> {
        self.dom.set_inner_html(node, html)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.dom.append_child(parent, child)
    }

    pub fn insert_after(&mut self, target: NodeId, child: NodeId) -> Result<()> {
        self.dom.insert_after(target, child)
    }

    /// Detaches `node`. Removing an already detached node is a no-op.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.dom.remove_node(node)
    }

    pub fn add_event_listener<F>(
        &mut self,
        target: EventTarget,
        event: &str,
        options: ListenerOptions,
        handler: F,
    ) -> ListenerId
    where
        F: Fn(&mut Page, &mut EventState) -> Result<()> + 'static,
    {
        let id = self.listeners.add(target, event, options, Rc::new(handler));
        let label = self.trace_target_label(target);
        self.trace_event_line(format!(
            "[event] listen {event} target={label} id={} capture={} once={}",
            id.0, options.capture, options.once
        ));
        id
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self, target: EventTarget, event: &str) -> usize {
        self.listeners.count(target, event)
    }

    pub(crate) fn trace_node_label(&self, node: NodeId) -> String {
        if node == self.dom.root {
            return "document".into();
        }
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }

    pub(crate) fn trace_target_label(&self, target: EventTarget) -> String {
        match target {
            EventTarget::Window => "window".into(),
            EventTarget::Node(node) => self.trace_node_label(node),
        }
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace.enabled && self.trace.events {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace.enabled && self.trace.timers {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_behavior_line(&mut self, line: String) {
        if self.trace.enabled && self.trace.behaviors {
            self.trace_line(line);
        }
    }

    fn trace_line(&mut self, line: String) {
        if self.trace.to_stderr {
            eprintln!("{line}");
        }
        if self.trace.logs.len() >= self.trace.log_limit {
            self.trace.logs.pop_front();
        }
        self.trace.logs.push_back(line);
    }
}
