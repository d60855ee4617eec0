//! Document access for the translation pass.
//!
//! The applicator only talks to the page through `DomPort`. `BindingKind`
//! describes the closed set of marker conventions: where each one's key is
//! read from and which surface receives the resolved text. `MemoryDocument`
//! is a small element tree implementing the port, used by tests and the CLI.

use crate::i18n::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id of the language toggle control.
pub const TOGGLE_CONTROL_ID: &str = "langToggle";

/// Tag of the toggle control's label element.
pub const TOGGLE_LABEL_TAG: &str = "span";

/// Class added to the root element once a pass has completed.
pub const READY_CLASS: &str = "i18n-ready";

/// Name of the meta element whose `content` receives the page description.
pub const DESCRIPTION_META: &str = "description";

/// Operations the translation pass needs from a document.
pub trait DomPort {
    /// Handle to an element. Handles are only valid for the pass that queried them.
    type Node: Clone;

    fn set_document_language(&mut self, code: &str);
    fn set_document_direction(&mut self, direction: Direction);
    fn add_document_class(&mut self, class: &str);
    fn set_title(&mut self, title: &str);

    /// All elements carrying `attribute`, in document order.
    fn query_by_attribute(&self, attribute: &str) -> Vec<Self::Node>;
    /// The first `<meta>` element whose `name` is `name`.
    fn query_meta(&self, name: &str) -> Option<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// The first descendant of `node` with tag `tag`.
    fn find_descendant(&self, node: &Self::Node, tag: &str) -> Option<Self::Node>;

    /// Whether `node` still resolves to an element. Replacing a parent's
    /// content detaches its descendants.
    fn contains(&self, node: &Self::Node) -> bool;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    /// Replace the node's children with plain text.
    fn set_text_content(&mut self, node: &Self::Node, text: &str);
    /// Replace the node's children with parsed markup.
    fn set_inner_html(&mut self, node: &Self::Node, markup: &str);
}

/// Where a binding kind writes its resolved text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The node's text content
    Text,
    /// The node's inner markup
    Markup,
    /// An attribute on the node
    Attribute(&'static str),
    /// The document title
    DocumentTitle,
    /// The `content` attribute of the named meta element
    MetaContent(&'static str),
}

/// The marker conventions that bind a node to a translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Content,
    Markup,
    Placeholder,
    AriaLabel,
    OptionLabel,
    TitleMeta,
    DescriptionMeta,
}

impl BindingKind {
    /// Every kind, in the order a pass applies them.
    pub const ALL: [BindingKind; 7] = [
        BindingKind::Content,
        BindingKind::Markup,
        BindingKind::Placeholder,
        BindingKind::AriaLabel,
        BindingKind::OptionLabel,
        BindingKind::TitleMeta,
        BindingKind::DescriptionMeta,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BindingKind::Content => "content",
            BindingKind::Markup => "markup",
            BindingKind::Placeholder => "placeholder",
            BindingKind::AriaLabel => "aria_label",
            BindingKind::OptionLabel => "option_label",
            BindingKind::TitleMeta => "title",
            BindingKind::DescriptionMeta => "description",
        }
    }

    /// Marker attribute for element bindings, or the meta `name` holding the
    /// key for the document-level bindings.
    pub fn marker(&self) -> &'static str {
        match self {
            BindingKind::Content => "data-i18n",
            BindingKind::Markup => "data-i18n-html",
            BindingKind::Placeholder => "data-i18n-placeholder",
            BindingKind::AriaLabel => "data-i18n-aria",
            BindingKind::OptionLabel => "data-i18n-option",
            BindingKind::TitleMeta => "i18n-title-key",
            BindingKind::DescriptionMeta => "i18n-desc-key",
        }
    }

    pub fn surface(&self) -> Surface {
        match self {
            BindingKind::Content | BindingKind::OptionLabel => Surface::Text,
            BindingKind::Markup => Surface::Markup,
            BindingKind::Placeholder => Surface::Attribute("placeholder"),
            BindingKind::AriaLabel => Surface::Attribute("aria-label"),
            BindingKind::TitleMeta => Surface::DocumentTitle,
            BindingKind::DescriptionMeta => Surface::MetaContent(DESCRIPTION_META),
        }
    }

    /// Whether the key is held by a single designated meta element rather than
    /// by a marker attribute on each bound node.
    pub fn is_meta(&self) -> bool {
        matches!(self, BindingKind::TitleMeta | BindingKind::DescriptionMeta)
    }

    /// Nodes holding keys for this kind.
    pub fn targets<D: DomPort>(&self, dom: &D) -> Vec<D::Node> {
        if self.is_meta() {
            dom.query_meta(self.marker()).into_iter().collect()
        } else {
            dom.query_by_attribute(self.marker())
        }
    }

    /// The translation key held by `node`.
    pub fn read_key<D: DomPort>(&self, dom: &D, node: &D::Node) -> Option<String> {
        let attribute = if self.is_meta() {
            "content"
        } else {
            self.marker()
        };
        dom.attribute(node, attribute)
    }

    /// Write `value` to this kind's surface. Returns `false` when the surface
    /// does not exist in the document.
    pub fn write<D: DomPort>(&self, dom: &mut D, node: &D::Node, value: &str) -> bool {
        match self.surface() {
            Surface::Text => dom.set_text_content(node, value),
            Surface::Markup => dom.set_inner_html(node, value),
            Surface::Attribute(name) => dom.set_attribute(node, name, value),
            Surface::DocumentTitle => dom.set_title(value),
            Surface::MetaContent(name) => match dom.query_meta(name) {
                Some(meta) => dom.set_attribute(&meta, "content", value),
                None => return false,
            },
        }
        true
    }
}

/// Child content of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    Text(String),
    Markup(String),
}

/// An element in a `MemoryDocument`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            content: None,
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.content = Some(Content::Text(text.to_string()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

/// Path of child indices from the document's top-level elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Vec<usize>);

/// In-memory document: root attributes, title and an element tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `element` under `parent` (or at the top level) and return its id.
    ///
    /// # Panics
    /// Panics if `parent` does not exist in this document.
    pub fn append(&mut self, parent: Option<&NodeId>, element: Element) -> NodeId {
        match parent {
            None => {
                self.elements.push(element);
                NodeId(vec![self.elements.len() - 1])
            }
            Some(parent_id) => {
                let parent = self
                    .get_mut(parent_id)
                    .expect("parent node should exist in document");
                parent.children.push(element);
                let mut path = parent_id.0.clone();
                path.push(parent.children.len() - 1);
                NodeId(path)
            }
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<&Element> {
        let (first, rest) = id.0.split_first()?;
        let mut element = self.elements.get(*first)?;
        for index in rest {
            element = element.children.get(*index)?;
        }
        Some(element)
    }

    fn get_mut(&mut self, id: &NodeId) -> Option<&mut Element> {
        let (first, rest) = id.0.split_first()?;
        let mut element = self.elements.get_mut(*first)?;
        for index in rest {
            element = element.children.get_mut(*index)?;
        }
        Some(element)
    }

    /// Text (or raw markup) directly set on the node.
    pub fn content_of(&self, id: &NodeId) -> Option<&str> {
        match self.get(id)?.content.as_ref()? {
            Content::Text(text) | Content::Markup(text) => Some(text.as_str()),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Ids of every element in document order, optionally below `root`.
    fn walk(&self, root: Option<&NodeId>) -> Vec<(NodeId, &Element)> {
        fn visit<'a>(
            path: Vec<usize>,
            element: &'a Element,
            out: &mut Vec<(NodeId, &'a Element)>,
        ) {
            for (index, child) in element.children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(index);
                out.push((NodeId(child_path.clone()), child));
                visit(child_path, child, out);
            }
        }

        let mut out = Vec::new();
        match root {
            None => {
                for (index, element) in self.elements.iter().enumerate() {
                    out.push((NodeId(vec![index]), element));
                    visit(vec![index], element, &mut out);
                }
            }
            Some(id) => {
                if let Some(element) = self.get(id) {
                    visit(id.0.clone(), element, &mut out);
                }
            }
        }
        out
    }
}

impl DomPort for MemoryDocument {
    type Node = NodeId;

    fn set_document_language(&mut self, code: &str) {
        self.lang = Some(code.to_string());
    }

    fn set_document_direction(&mut self, direction: Direction) {
        self.dir = Some(direction.as_str().to_string());
    }

    fn add_document_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn query_by_attribute(&self, attribute: &str) -> Vec<NodeId> {
        self.walk(None)
            .into_iter()
            .filter(|(_, element)| element.attributes.contains_key(attribute))
            .map(|(id, _)| id)
            .collect()
    }

    fn query_meta(&self, name: &str) -> Option<NodeId> {
        self.walk(None)
            .into_iter()
            .find(|(_, element)| {
                element.tag == "meta"
                    && element.attributes.get("name").map(String::as_str) == Some(name)
            })
            .map(|(id, _)| id)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk(None)
            .into_iter()
            .find(|(_, element)| element.attributes.get("id").map(String::as_str) == Some(id))
            .map(|(node, _)| node)
    }

    fn find_descendant(&self, node: &NodeId, tag: &str) -> Option<NodeId> {
        self.walk(Some(node))
            .into_iter()
            .find(|(_, element)| element.tag == tag)
            .map(|(id, _)| id)
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.get(node).is_some()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get(node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(element) = self.get_mut(node) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        if let Some(element) = self.get_mut(node) {
            element.children.clear();
            element.content = Some(Content::Text(text.to_string()));
        }
    }

    fn set_inner_html(&mut self, node: &NodeId, markup: &str) {
        if let Some(element) = self.get_mut(node) {
            element.children.clear();
            element.content = Some(Content::Markup(markup.to_string()));
        }
    }
}
