use super::*;

const ACTION_STACK_BYTES: usize = 32 * 1024 * 1024;

impl Page {
    /// Fires `DOMContentLoaded` at the document; window listeners see it bubble.
    pub fn load_dom_content(&mut self) -> Result<()> {
        let document = self.dom.root;
        stacker::grow(ACTION_STACK_BYTES, || {
            self.dispatch_event(EventTarget::Node(document), "DOMContentLoaded")?;
            Ok(())
        })
    }

    /// Replaces the value of an input or textarea and fires `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        stacker::grow(ACTION_STACK_BYTES, || {
            self.dom.set_value(target, text)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            Ok(())
        })
    }

    /// Picks the option of a select whose value is `value`, then fires `input`
    /// and `change`. A value no option carries leaves the select empty.
    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "select" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: tag,
            });
        }

        stacker::grow(ACTION_STACK_BYTES, || {
            self.dom.set_select_value(target, value)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.dispatch_event(EventTarget::Node(target), "change")?;
            Ok(())
        })
    }

    /// Clicks the first match. Unless a listener prevents it, a click on an
    /// anchor records a navigation and a click on a submit control submits
    /// its form.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(ACTION_STACK_BYTES, || self.click_node(target))
    }

    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let Some(form) = self.resolve_form_for_submit(target) else {
            return Ok(());
        };
        stacker::grow(ACTION_STACK_BYTES, || self.submit_form(form))
    }

    /// Hands `files` to a file input, then fires `input` and `change`.
    pub fn set_input_files(&mut self, selector: &str, files: &[MockFile]) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=file]".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();
        if tag != "input" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=file]".into(),
                actual: tag,
            });
        }

        let kind = self
            .dom
            .attr(target, "type")
            .unwrap_or_else(|| "text".into())
            .to_ascii_lowercase();
        if kind != "file" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=file]".into(),
                actual: format!("input[type={kind}]"),
            });
        }

        stacker::grow(ACTION_STACK_BYTES, || {
            self.dom.set_files(target, files)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.dispatch_event(EventTarget::Node(target), "change")?;
            Ok(())
        })
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(ACTION_STACK_BYTES, || {
            self.dispatch_event(EventTarget::Node(target), event)?;
            Ok(())
        })
    }

    fn click_node(&mut self, target: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(EventTarget::Node(target), "click")?;
        if outcome.default_prevented {
            return Ok(());
        }

        if self.dom.is_tag(target, "a") {
            if let Some(href) = self.dom.attr(target, "href") {
                self.trace_behavior_line(format!("[navigate] href={href}"));
                self.platform_mocks.navigations.push(href);
            }
            return Ok(());
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.resolve_form_for_submit(target) {
                self.submit_form(form)?;
            }
        }
        Ok(())
    }

    fn submit_form(&mut self, form: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(EventTarget::Node(form), "submit")?;
        let label = self.trace_node_label(form);
        if outcome.default_prevented {
            self.trace_behavior_line(format!("[submit] form={label} cancelled=true"));
            return Ok(());
        }
        let action = self.dom.attr(form, "action").unwrap_or_default();
        let method = self
            .dom
            .attr(form, "method")
            .map(|method| method.to_ascii_lowercase())
            .unwrap_or_else(|| "get".into());
        self.trace_behavior_line(format!(
            "[submit] form={label} cancelled=false action={action} method={method}"
        ));
        self.platform_mocks.submissions.push(FormSubmission {
            form,
            action,
            method,
        });
        Ok(())
    }

    fn resolve_form_for_submit(&self, target: NodeId) -> Option<NodeId> {
        if self.dom.is_tag(target, "form") {
            return Some(target);
        }
        self.dom.find_ancestor_by_tag(target, "form")
    }
}

fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    if element.tag_name.eq_ignore_ascii_case("button") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }

    if element.tag_name.eq_ignore_ascii_case("input") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(false);
    }

    false
}
