use super::*;

/// Where a listener is registered: the window or a node of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    /// Drop the listener right before its first invocation.
    pub once: bool,
}

impl ListenerOptions {
    pub fn once() -> Self {
        Self {
            capture: false,
            once: true,
        }
    }

    pub fn capture() -> Self {
        Self {
            capture: true,
            once: false,
        }
    }
}

pub(crate) type EventHandler = Rc<dyn Fn(&mut Page, &mut EventState) -> Result<()>>;

#[derive(Clone)]
pub(crate) struct Listener {
    pub(crate) id: ListenerId,
    pub(crate) capture: bool,
    pub(crate) once: bool,
    pub(crate) handler: EventHandler,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("capture", &self.capture)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListenerStore {
    map: HashMap<EventTarget, HashMap<String, Vec<Listener>>>,
    next_id: u64,
}

impl ListenerStore {
    pub(crate) fn add(
        &mut self,
        target: EventTarget,
        event: &str,
        options: ListenerOptions,
        handler: EventHandler,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.map
            .entry(target)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(Listener {
                id,
                capture: options.capture,
                once: options.once,
                handler,
            });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        for events in self.map.values_mut() {
            for listeners in events.values_mut() {
                let before = listeners.len();
                listeners.retain(|listener| listener.id != id);
                removed |= listeners.len() != before;
            }
            events.retain(|_, listeners| !listeners.is_empty());
        }
        self.map.retain(|_, events| !events.is_empty());
        removed
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.map
            .values()
            .flat_map(|events| events.values())
            .flatten()
            .any(|listener| listener.id == id)
    }

    pub(crate) fn get(&self, target: EventTarget, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: EventTarget, event: &str) -> usize {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// The event object handed to every listener during one dispatch.
#[derive(Debug, Clone)]
pub struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: EventTarget,
    pub(crate) current_target: EventTarget,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: EventTarget) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> EventTarget {
        self.target
    }

    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window => None,
        }
    }

    pub fn current_target(&self) -> EventTarget {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}
