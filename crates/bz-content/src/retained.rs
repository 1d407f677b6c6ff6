//! Retained-id allocation
//!
//! Elements whose identity must survive serialization carry a
//! `data-bz-retained="retained_<pageId>_<n>"` attribute. One allocator is
//! owned by each editing session; it issues strictly increasing `n` and
//! learns the high-water mark of ids already present in the document.
//!
//! `n` is an unbounded decimal: authored content may carry any digit
//! string, and the next issued number must exceed all of them.

use crate::config::validate_page_id;
use crate::Result;
use bz_dom::{Attributes, DomTree, MutationRecord, MutationType, NodeId};
use std::cmp::Ordering;
use std::fmt;

/// Attribute holding the retained id
pub const RETAINED_ATTR: &str = "data-bz-retained";

/// Decimal sequence number of any width, without leading zeros
#[derive(Debug, Clone, PartialEq, Eq)]
struct Sequence(String);

impl Sequence {
    fn one() -> Self {
        Self("1".to_string())
    }

    /// Canonical form of an all-digit string
    fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        Some(Self(if trimmed.is_empty() { "0" } else { trimmed }.to_string()))
    }

    fn successor(&self) -> Self {
        let mut digits: Vec<u8> = self.0.bytes().collect();
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }

        let mut next = String::with_capacity(digits.len() + 1);
        if carry {
            next.push('1');
        }
        next.extend(digits.into_iter().map(char::from));
        Self(next)
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequential retained-id allocator for one page
#[derive(Debug, Clone)]
pub struct RetainedAllocator {
    page_id: String,
    prefix: String,
    counter: Sequence,
}

impl RetainedAllocator {
    /// Seeded allocator for `page_id`, counter at 1
    pub fn new(page_id: &str) -> Result<Self> {
        validate_page_id(page_id)?;
        Ok(Self {
            page_id: page_id.to_string(),
            prefix: format!("retained_{page_id}_"),
            counter: Sequence::one(),
        })
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// `retained_<pageId>_`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number the next call to [`next_id`](Self::next_id) will use
    pub fn peek(&self) -> &str {
        &self.counter.0
    }

    /// Issue the next id and advance the counter
    ///
    /// Ids are never reissued within a session, but nothing checks the
    /// document for an id this allocator has never observed.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.counter);
        self.counter = self.counter.successor();
        tracing::trace!(%id, "issued retained id");
        id
    }

    /// Sequence number of `value` if it belongs to this page, without
    /// leading zeros
    pub fn parse(&self, value: &str) -> Option<String> {
        self.parse_sequence(value).map(|n| n.0)
    }

    fn parse_sequence(&self, value: &str) -> Option<Sequence> {
        Sequence::parse(value.strip_prefix(&self.prefix)?)
    }

    /// Whether `value` is in this page's retained namespace
    pub fn owns(&self, value: &str) -> bool {
        self.parse_sequence(value).is_some()
    }

    /// Advance past `value` if it belongs to this page. Returns whether it did.
    pub fn observe_value(&mut self, value: &str) -> bool {
        let Some(n) = self.parse_sequence(value) else {
            return false;
        };
        if n >= self.counter {
            self.counter = n.successor();
        }
        true
    }

    /// Inspect an element's attribute set
    pub fn observe_attributes(&mut self, attrs: &Attributes) {
        if let Some(value) = attrs.get(RETAINED_ATTR) {
            self.observe_value(value);
        }
    }

    /// Follow one change notification from the document
    ///
    /// An attribute change inspects the target's whole attribute set; a
    /// child-list change inspects every added subtree. Records pointing at
    /// nodes the tree no longer has are ignored.
    pub fn observe(&mut self, tree: &DomTree, record: &MutationRecord) {
        match record.mutation_type {
            MutationType::Attributes => {
                if let Some(elem) = tree.element(record.target) {
                    self.observe_attributes(&elem.attrs);
                }
            }
            MutationType::ChildList => {
                for &added in &record.added_nodes {
                    self.observe_subtree(tree, added);
                }
            }
        }
    }

    /// Eager scan of every element in `tree`
    pub fn seed_from_tree(&mut self, tree: &DomTree) {
        self.observe_subtree(tree, tree.root());
    }

    fn observe_subtree(&mut self, tree: &DomTree, id: NodeId) {
        if let Some(elem) = tree.element(id) {
            self.observe_attributes(&elem.attrs);
        }
        for (_, node) in tree.descendants(id) {
            if let Some(elem) = node.as_element() {
                self.observe_attributes(&elem.attrs);
            }
        }
    }

    /// Reset for a newly loaded document and fast-forward past its content
    pub fn load(&mut self, tree: &DomTree) {
        self.counter = Sequence::one();
        self.seed_from_tree(tree);
        tracing::debug!(page_id = %self.page_id, next = %self.counter, "seeded retained counter");
    }

    /// Give `id` a retained id unless it already has one
    ///
    /// Returns the newly assigned value. Text nodes and elements that
    /// already carry the attribute are left alone.
    pub fn assign(&mut self, tree: &mut DomTree, id: NodeId) -> Option<String> {
        let elem = tree.element(id)?;
        if elem.attrs.contains(RETAINED_ATTR) {
            return None;
        }
        let value = self.next_id();
        tree.set_attribute(id, RETAINED_ATTR, &value).ok()?;
        Some(value)
    }
}
