use super::*;

impl Page {
    /// Fires `event_type` at `target` and returns the final event state.
    ///
    /// Node targets propagate through their ancestors, the document and then
    /// the window: capture listeners run top-down, target listeners in
    /// registration order, bubble listeners bottom-up. A detached node only
    /// reaches its own detached ancestors.
    pub fn dispatch_event(&mut self, target: EventTarget, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        let path = self.propagation_path(target);

        let Some((_, ancestors)) = path.split_last() else {
            self.trace_event_done(&event, "empty_path");
            return Ok(event);
        };

        // Capture phase.
        for current in ancestors {
            event.current_target = *current;
            self.invoke_listeners(*current, &mut event, true)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, "propagation_stopped");
                return Ok(event);
            }
        }

        // Target phase: capture listeners first.
        event.current_target = target;
        self.invoke_listeners(target, &mut event, true)?;
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return Ok(event);
        }

        self.invoke_listeners(target, &mut event, false)?;
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return Ok(event);
        }

        // Bubble phase.
        for current in ancestors.iter().rev() {
            event.current_target = *current;
            self.invoke_listeners(*current, &mut event, false)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, "propagation_stopped");
                return Ok(event);
            }
        }

        self.trace_event_done(&event, "completed");
        Ok(event)
    }

    /// Outermost first, `target` last.
    fn propagation_path(&self, target: EventTarget) -> Vec<EventTarget> {
        let mut path = Vec::new();
        if let EventTarget::Node(node) = target {
            let mut cursor = Some(node);
            while let Some(current) = cursor {
                path.push(EventTarget::Node(current));
                cursor = self.dom.parent(current);
            }
            if self.dom.is_connected(node) {
                path.push(EventTarget::Window);
            }
        } else {
            path.push(EventTarget::Window);
        }
        path.reverse();
        path
    }

    fn invoke_listeners(
        &mut self,
        current: EventTarget,
        event: &mut EventState,
        capture: bool,
    ) -> Result<()> {
        let listeners = self.listeners.get(current, &event.event_type, capture);
        for listener in listeners {
            // A handler earlier in this dispatch may have removed it.
            if !self.listeners.contains(listener.id) {
                continue;
            }
            if listener.once {
                self.listeners.remove(listener.id);
            }
            if self.trace.enabled {
                let phase = if capture { "capture" } else { "bubble" };
                let target_label = self.trace_target_label(event.target);
                let current_label = self.trace_target_label(event.current_target);
                self.trace_event_line(format!(
                    "[event] {} target={} current={} phase={} default_prevented={}",
                    event.event_type, target_label, current_label, phase, event.default_prevented
                ));
            }
            (listener.handler)(self, event)?;
            if event.immediate_propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !self.trace.enabled {
            return;
        }
        let target_label = self.trace_target_label(event.target);
        let current_label = self.trace_target_label(event.current_target);
        self.trace_event_line(format!(
            "[event] done {} target={} current={} outcome={} default_prevented={} propagation_stopped={} immediate_stopped={}",
            event.event_type,
            target_label,
            current_label,
            outcome,
            event.default_prevented,
            event.propagation_stopped,
            event.immediate_propagation_stopped
        ));
    }
}
