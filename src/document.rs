//! In-memory document model
//!
//! A small element tree exposing the part of the DOM the localization
//! controller needs: attribute queries in document order, text content,
//! attributes, class lists, `<select>` value semantics and change
//! listeners. Elements live in an arena and are addressed by `ElementId`;
//! detached elements stay in the arena but are no longer reachable by
//! queries.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    change_listeners: usize,
    /// Set once a value was assigned to a `<select>`; from then on an
    /// unmatched value leaves nothing selected
    value_assigned: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_lowercase(),
            attributes: BTreeMap::new(),
            classes: BTreeSet::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
            change_listeners: 0,
            value_assigned: false,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Own text, not including descendants
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
    html: ElementId,
    head: ElementId,
    body: ElementId,
}

impl Document {
    /// An empty `<html><head></head><body></body></html>` document
    pub fn new() -> Self {
        let mut document = Document {
            elements: vec![Element::new("html")],
            html: ElementId(0),
            head: ElementId(0),
            body: ElementId(0),
        };
        document.head = document.create_element("head");
        document.body = document.create_element("body");
        document.append_child(document.html, document.head);
        document.append_child(document.html, document.body);
        document
    }

    pub fn html(&self) -> ElementId {
        self.html
    }

    pub fn head(&self) -> ElementId {
        self.head
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// # Panics
    ///
    /// Panics if `id` was not created by this document.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(Element::new(tag));
        ElementId(self.elements.len() - 1)
    }

    /// Move `child` to the end of `parent`'s children
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(child);
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(
        &mut self,
        parent: ElementId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        let id = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(id, name, value);
        }
        self.append_child(parent, id);
        id
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.element_mut(id).parent.take() {
            self.element_mut(parent).children.retain(|child| *child != id);
        }
    }

    pub fn clear_children(&mut self, id: ElementId) {
        let element = self.element_mut(id);
        element.value_assigned = false;
        let children = std::mem::take(&mut element.children);
        for child in children {
            self.element_mut(child).parent = None;
        }
    }

    /// Replace the element's content with a single text run
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        self.clear_children(id);
        self.element_mut(id).text = text.to_string();
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        self.element_mut(id)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        self.element_mut(id).attributes.remove(name);
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).classes.remove(class);
    }

    /// Attached elements in document order
    fn walk(&self) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack = vec![self.html];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.element(id).children.iter().rev());
        }
        order
    }

    /// Attached elements carrying `name`, in document order
    pub fn elements_with_attribute(&self, name: &str) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|id| self.element(*id).has_attribute(name))
            .collect()
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.walk()
            .into_iter()
            .find(|el| self.element(*el).attribute("id") == Some(id))
    }

    pub fn first_by_tag(&self, tag: &str) -> Option<ElementId> {
        let tag = tag.to_lowercase();
        self.walk()
            .into_iter()
            .find(|el| self.element(*el).tag == tag)
    }

    /// Select the `<option>` child whose value equals `value` and deselect
    /// the others. An unmatched value leaves no option selected.
    pub fn set_select_value(&mut self, select: ElementId, value: &str) {
        self.element_mut(select).value_assigned = true;
        let options = self.element(select).children.clone();
        for option in options {
            if self.element(option).attribute("value") == Some(value) {
                self.set_attribute(option, "selected", "");
            } else {
                self.remove_attribute(option, "selected");
            }
        }
    }

    /// Value of the selected `<option>` child
    ///
    /// Before any value is assigned, the first option counts as selected
    /// when none is marked. After an unmatched assignment this is `None`.
    pub fn select_value(&self, select: ElementId) -> Option<&str> {
        let element = self.element(select);
        let options = &element.children;
        options
            .iter()
            .find(|option| self.element(**option).has_attribute("selected"))
            .or_else(|| {
                if element.value_assigned {
                    None
                } else {
                    options.first()
                }
            })
            .and_then(|option| self.element(*option).attribute("value"))
    }

    pub fn add_change_listener(&mut self, id: ElementId) {
        self.element_mut(id).change_listeners += 1;
    }

    pub fn change_listener_count(&self, id: ElementId) -> usize {
        self.element(id).change_listeners
    }

    /// Serialize the attached tree as HTML
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_element(self.html, 0, &mut out);
        out
    }

    fn render_element(&self, id: ElementId, depth: usize, out: &mut String) {
        let element = self.element(id);
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, element.tag);
        for (name, value) in &element.attributes {
            if value.is_empty() {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
        }
        if !element.classes.is_empty() {
            let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
            let _ = write!(out, " class=\"{}\"", classes.join(" "));
        }
        out.push('>');

        if element.children.is_empty() {
            out.push_str(&escape(&element.text));
        } else {
            out.push('\n');
            if !element.text.is_empty() {
                let _ = writeln!(out, "{}  {}", indent, escape(&element.text));
            }
            for child in &element.children {
                self.render_element(*child, depth + 1, out);
            }
            out.push_str(&indent);
        }
        let _ = writeln!(out, "</{}>", element.tag);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
