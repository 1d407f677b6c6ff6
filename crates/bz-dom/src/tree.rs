//! DOM Tree (arena-based allocation)

use crate::{
    DomError, DomResult, Descendants, ElementData, MutationRecord, Node, NodeData, NodeId,
};

/// Arena-based DOM tree
///
/// Node 0 is always the document root. Fragments (paste payloads, builder
/// output) are trees whose root children are the fragment's top-level nodes.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    observing: bool,
    records: Vec<MutationRecord>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            observing: false,
            records: Vec::new(),
        }
    }

    /// Root node ID
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data of `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data of `id`
    ///
    /// Writes made through this handle are not recorded; use
    /// [`set_attribute`](Self::set_attribute) for observed edits.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of nodes in the arena, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children
    pub fn is_empty(&self) -> bool {
        !self.nodes[NodeId::ROOT.index()].first_child.is_valid()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached element with attributes
    pub fn create_element_with<K, V>(
        &mut self,
        tag: &str,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> NodeId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut node = Node::element(tag);
        if let NodeData::Element(elem) = &mut node.data {
            elem.attrs.extend(attrs);
        }
        self.push(node)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    /// Start recording mutation records
    pub fn observe(&mut self) {
        self.observing = true;
    }

    /// Stop recording and drop pending records
    pub fn disconnect(&mut self) {
        self.observing = false;
        self.records.clear();
    }

    /// Take pending mutation records, oldest first
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;

        let hierarchy = DomError::HierarchyRequest { parent, child };
        if matches!(parent_node.data, NodeData::Text(_) | NodeData::Comment(_))
            || child == NodeId::ROOT
            || child_node.parent.is_valid()
            || self.is_inclusive_ancestor(child, parent)
        {
            return Err(hierarchy);
        }

        self.link(parent, child);
        if self.observing {
            self.records.push(MutationRecord::child_list(parent, vec![child]));
        }
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while node.is_valid() {
            if node == ancestor {
                return true;
            }
            node = self.nodes[node.index()].parent;
        }
        false
    }

    // Unchecked append, used while building detached subtrees
    fn link(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
            self.nodes[child.index()].prev_sibling = last;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        self.nodes[child.index()].parent = parent;
    }

    /// Iterate direct children of `id`
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::successors(self.get(first).map(|n| (first, n)), move |(_, node)| {
            let next = node.next_sibling;
            self.get(next).map(|n| (next, n))
        })
    }

    /// Child ids of `id`, collected so the tree can be mutated while visiting
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Iterate direct element children of `id`
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &ElementData)> + '_ {
        self.children(id)
            .filter_map(|(child, node)| node.as_element().map(|e| (child, e)))
    }

    /// Pre-order iteration over all descendants of `id` (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    /// Get an attribute of an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Set an attribute, recording the change when observed
    ///
    /// Returns the previous value. Writing the value an attribute already
    /// has does not produce a record.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<Option<String>> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        let elem = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        let old = elem.set_attr(name, value);

        if self.observing && old.as_deref() != Some(value) {
            self.records
                .push(MutationRecord::attributes(id, name, old.clone()));
        }
        Ok(old)
    }

    /// Remove an attribute, recording the change when observed
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        let elem = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        let old = elem.attrs.remove(name);

        if self.observing && old.is_some() {
            self.records
                .push(MutationRecord::attributes(id, name, old.clone()));
        }
        Ok(old)
    }

    /// First element (document order) whose `name` attribute equals `value`
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&(_, node)| {
                node.as_element()
                    .and_then(|e| e.get_attr(name))
                    .is_some_and(|v| v == value)
            })
            .map(|(id, _)| id)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_by_attribute("id", id)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|(_, node)| node.as_text())
            .collect()
    }

    /// Deep-copy the children of `src_parent` in `src` under `parent` here
    ///
    /// Each copied top-level node is appended through
    /// [`append_child`](Self::append_child), so an observed tree records one
    /// child-list mutation per top-level node.
    pub fn import_children(
        &mut self,
        src: &DomTree,
        src_parent: NodeId,
        parent: NodeId,
    ) -> DomResult<Vec<NodeId>> {
        let mut imported = Vec::new();
        for child in src.child_ids(src_parent) {
            let copy = self.copy_detached(src, child)?;
            self.append_child(parent, copy)?;
            imported.push(copy);
        }
        tracing::trace!(count = imported.len(), ?parent, "imported fragment children");
        Ok(imported)
    }

    fn copy_detached(&mut self, src: &DomTree, src_id: NodeId) -> DomResult<NodeId> {
        let node = src.get(src_id).ok_or(DomError::NotFound(src_id))?;
        let copy = self.push(Node {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data: node.data.clone(),
        });
        for child in src.child_ids(src_id) {
            let child_copy = self.copy_detached(src, child)?;
            self.link(copy, child_copy);
        }
        Ok(copy)
    }

    /// Copy of this tree without observation state
    pub fn detached_clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            observing: false,
            records: Vec::new(),
        }
    }

    /// Structural equality: same node kinds, tags and text in the same
    /// order, regardless of arena layout. Attribute values are ignored.
    pub fn same_structure(&self, a: NodeId, other: &DomTree, b: NodeId) -> bool {
        let (Some(left), Some(right)) = (self.get(a), other.get(b)) else {
            return false;
        };
        let same_data = match (&left.data, &right.data) {
            (NodeData::Element(l), NodeData::Element(r)) => l.tag == r.tag,
            (l, r) => l == r,
        };
        if !same_data {
            return false;
        }
        let left_children = self.child_ids(a);
        let right_children = other.child_ids(b);
        left_children.len() == right_children.len()
            && left_children
                .iter()
                .zip(&right_children)
                .all(|(&l, &r)| self.same_structure(l, other, r))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
