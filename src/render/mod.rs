//! DOM-like rendering surface and batched mutations.
//!
//! The clock core never touches a concrete display. It describes changes as
//! [`Mutation`]s, queues them on a [`RenderBatcher`], and the batcher applies
//! them to a [`Surface`] once per frame. Every surface operation tolerates a
//! missing target by doing nothing.

mod batcher;
pub mod layout;
mod memory;
mod terminal;


pub use batcher::{FrameScheduler, RenderBatcher, TokioFrameScheduler, next_frame_delay};
pub use memory::{Element, MemorySurface, SharedSurface};
pub use terminal::TerminalSurface;

use std::fmt;

/// Identifier of an element on a [`Surface`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A display surface organised as a tree of identified elements.
///
/// Implementations must treat every write to an absent element as a no-op
/// and every write as idempotent.
pub trait Surface {
    /// Whether `id` exists.
    fn contains(&self, id: &ElementId) -> bool;

    /// Whether `id` is `ancestor` or nested anywhere below it.
    fn is_within(&self, id: &ElementId, ancestor: &ElementId) -> bool;

    /// Creates `id` as the last child of `parent`. Does nothing if `id`
    /// already exists or `parent` does not.
    fn create_element(&mut self, id: &ElementId, parent: &ElementId, class: &str);

    /// Removes `id` and everything below it.
    fn remove_element(&mut self, id: &ElementId);

    /// Removes every child of `id`.
    fn clear_children(&mut self, id: &ElementId);

    /// Replaces the text content of `id`.
    fn set_text(&mut self, id: &ElementId, text: &str);

    /// Sets an attribute on `id`.
    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str);

    /// Removes an attribute from `id`.
    fn remove_attribute(&mut self, id: &ElementId, name: &str);

    /// Sets an inline style property on `id`.
    fn set_style(&mut self, id: &ElementId, property: &str, value: &str);

    /// Adds or removes a class on `id`.
    fn set_class(&mut self, id: &ElementId, class: &str, enabled: bool);

    /// Moves keyboard focus to `id`.
    fn focus(&mut self, id: &ElementId);

    /// Called once after each batch of mutations has been applied.
    fn present(&mut self) {}
}

/// A deferred change to a [`Surface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Create an element under a parent
    CreateElement {
        /// New element
        id: ElementId,
        /// Existing parent
        parent: ElementId,
        /// Initial class list
        class: String,
    },
    /// Remove an element and its subtree
    RemoveElement {
        /// Element to remove
        id: ElementId,
    },
    /// Remove all children of an element
    ClearChildren {
        /// Container to empty
        id: ElementId,
    },
    /// Replace text content
    SetText {
        /// Target element
        id: ElementId,
        /// New content
        text: String,
    },
    /// Set an attribute
    SetAttribute {
        /// Target element
        id: ElementId,
        /// Attribute name
        name: String,
        /// Attribute value
        value: String,
    },
    /// Remove an attribute
    RemoveAttribute {
        /// Target element
        id: ElementId,
        /// Attribute name
        name: String,
    },
    /// Set an inline style property
    SetStyle {
        /// Target element
        id: ElementId,
        /// CSS property name
        property: String,
        /// CSS value
        value: String,
    },
    /// Toggle a class
    SetClass {
        /// Target element
        id: ElementId,
        /// Class name
        class: String,
        /// Whether the class should be present
        enabled: bool,
    },
    /// Move keyboard focus
    Focus {
        /// Element to focus
        id: ElementId,
    },
}

impl Mutation {
    /// Shorthand for [`Mutation::SetText`].
    pub fn text(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Mutation::SetText {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Shorthand for [`Mutation::SetAttribute`].
    pub fn attribute(
        id: impl Into<ElementId>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Mutation::SetAttribute {
            id: id.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`Mutation::SetStyle`].
    pub fn style(
        id: impl Into<ElementId>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Mutation::SetStyle {
            id: id.into(),
            property: property.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`Mutation::SetClass`].
    pub fn class(id: impl Into<ElementId>, class: impl Into<String>, enabled: bool) -> Self {
        Mutation::SetClass {
            id: id.into(),
            class: class.into(),
            enabled,
        }
    }

    /// Shorthand for [`Mutation::CreateElement`].
    pub fn create(
        id: impl Into<ElementId>,
        parent: impl Into<ElementId>,
        class: impl Into<String>,
    ) -> Self {
        Mutation::CreateElement {
            id: id.into(),
            parent: parent.into(),
            class: class.into(),
        }
    }

    /// Applies the mutation to `surface`.
    pub fn apply(&self, surface: &mut dyn Surface) {
        match self {
            Mutation::CreateElement { id, parent, class } => {
                surface.create_element(id, parent, class)
            }
            Mutation::RemoveElement { id } => surface.remove_element(id),
            Mutation::ClearChildren { id } => surface.clear_children(id),
            Mutation::SetText { id, text } => surface.set_text(id, text),
            Mutation::SetAttribute { id, name, value } => surface.set_attribute(id, name, value),
            Mutation::RemoveAttribute { id, name } => surface.remove_attribute(id, name),
            Mutation::SetStyle {
                id,
                property,
                value,
            } => surface.set_style(id, property, value),
            Mutation::SetClass { id, class, enabled } => surface.set_class(id, class, *enabled),
            Mutation::Focus { id } => surface.focus(id),
        }
    }
}
