use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

use super::{ElementId, Surface, layout};

/// One element of a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Parent element, `None` for the root
    pub parent: Option<ElementId>,
    /// Children in document order
    pub children: Vec<ElementId>,
    /// Text content
    pub text: String,
    /// Class list
    pub classes: BTreeSet<String>,
    /// Attributes
    pub attributes: BTreeMap<String, String>,
    /// Inline styles
    pub styles: BTreeMap<String, String>,
}

/// An in-memory element tree.
///
/// Used headless, in tests, and as the backing store of the terminal
/// surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    elements: HashMap<ElementId, Element>,
    focused: Option<ElementId>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// A surface holding only the `body` root.
    pub fn new() -> Self {
        let mut elements = HashMap::new();
        elements.insert(ElementId::from(layout::BODY), Element::default());

        Self {
            elements,
            focused: None,
        }
    }

    /// A surface with the full page skeleton in place.
    pub fn page() -> Self {
        let mut surface = Self::new();
        for mutation in layout::page_skeleton() {
            mutation.apply(&mut surface);
        }
        surface
    }

    /// The element with `id`.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(&ElementId::from(id))
    }

    /// Text content of `id`.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|element| element.text.as_str())
    }

    /// Attribute `name` of `id`.
    pub fn attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    /// Inline style `property` of `id`.
    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.element(id)
            .and_then(|element| element.styles.get(property))
            .map(String::as_str)
    }

    /// Whether `id` carries `class`.
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .is_some_and(|element| element.classes.contains(class))
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: &str) -> Vec<&ElementId> {
        self.element(id)
            .map(|element| element.children.iter().collect())
            .unwrap_or_default()
    }

    /// The focused element.
    pub fn focused(&self) -> Option<&ElementId> {
        self.focused.as_ref()
    }

    /// Number of elements, root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Never true: the root always exists.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn remove_subtree(&mut self, id: &ElementId) {
        if let Some(element) = self.elements.remove(id) {
            for child in element.children {
                self.remove_subtree(&child);
            }
            if self.focused.as_ref() == Some(id) {
                self.focused = None;
            }
        }
    }
}

impl Surface for MemorySurface {
    fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    fn is_within(&self, id: &ElementId, ancestor: &ElementId) -> bool {
        let mut current = Some(id);

        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self
                .elements
                .get(candidate)
                .and_then(|element| element.parent.as_ref());
        }

        false
    }

    fn create_element(&mut self, id: &ElementId, parent: &ElementId, class: &str) {
        if self.elements.contains_key(id) {
            return;
        }
        let Some(parent_element) = self.elements.get_mut(parent) else {
            return;
        };

        parent_element.children.push(id.clone());
        self.elements.insert(
            id.clone(),
            Element {
                parent: Some(parent.clone()),
                classes: class.split_whitespace().map(str::to_string).collect(),
                ..Element::default()
            },
        );
    }

    fn remove_element(&mut self, id: &ElementId) {
        let Some(parent) = self.elements.get(id).and_then(|element| element.parent.clone()) else {
            return;
        };

        if let Some(parent_element) = self.elements.get_mut(&parent) {
            parent_element.children.retain(|child| child != id);
        }
        self.remove_subtree(id);
    }

    fn clear_children(&mut self, id: &ElementId) {
        let Some(element) = self.elements.get_mut(id) else {
            return;
        };

        let children = std::mem::take(&mut element.children);
        for child in &children {
            self.remove_subtree(child);
        }
    }

    fn set_text(&mut self, id: &ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = text.to_string();
        }
    }

    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, id: &ElementId, name: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attributes.remove(name);
        }
    }

    fn set_style(&mut self, id: &ElementId, property: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        }
    }

    fn set_class(&mut self, id: &ElementId, class: &str, enabled: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            if enabled {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    fn focus(&mut self, id: &ElementId) {
        if self.elements.contains_key(id) {
            self.focused = Some(id.clone());
        }
    }
}

/// A [`MemorySurface`] shared between the event loop and an observer.
#[derive(Debug, Clone, Default)]
pub struct SharedSurface {
    inner: Arc<Mutex<MemorySurface>>,
}

impl SharedSurface {
    /// Shares `surface`.
    pub fn new(surface: MemorySurface) -> Self {
        Self {
            inner: Arc::new(Mutex::new(surface)),
        }
    }

    /// Locks the surface for inspection, recovering from poisoning.
    pub fn lock(&self) -> MutexGuard<'_, MemorySurface> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Surface for SharedSurface {
    fn contains(&self, id: &ElementId) -> bool {
        self.lock().contains(id)
    }

    fn is_within(&self, id: &ElementId, ancestor: &ElementId) -> bool {
        self.lock().is_within(id, ancestor)
    }

    fn create_element(&mut self, id: &ElementId, parent: &ElementId, class: &str) {
        self.lock().create_element(id, parent, class);
    }

    fn remove_element(&mut self, id: &ElementId) {
        self.lock().remove_element(id);
    }

    fn clear_children(&mut self, id: &ElementId) {
        self.lock().clear_children(id);
    }

    fn set_text(&mut self, id: &ElementId, text: &str) {
        self.lock().set_text(id, text);
    }

    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str) {
        self.lock().set_attribute(id, name, value);
    }

    fn remove_attribute(&mut self, id: &ElementId, name: &str) {
        self.lock().remove_attribute(id, name);
    }

    fn set_style(&mut self, id: &ElementId, property: &str, value: &str) {
        self.lock().set_style(id, property, value);
    }

    fn set_class(&mut self, id: &ElementId, class: &str, enabled: bool) {
        self.lock().set_class(id, class, enabled);
    }

    fn focus(&mut self, id: &ElementId) {
        self.lock().focus(id);
    }
}
