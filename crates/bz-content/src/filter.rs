//! Attribute whitelist
//!
//! A closed set of attribute names survives the boundary between serialized
//! content and the editable document, in both directions. Everything else is
//! dropped without complaint.

use bz_dom::{Attributes, DomTree};
use std::collections::BTreeSet;

/// Attributes allowed into and out of the document model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowedAttribute {
    // structure
    Class,
    Id,
    Name,
    Value,
    Type,
    For,
    // form state
    Checked,
    Selected,
    Placeholder,
    Disabled,
    // presentation
    Style,
    Title,
    Tabindex,
    Href,
    Src,
    Alt,
    // radio grouping
    RadioGroup,
    // identity and grading
    Retained,
    Weight,
    PartialCredit,
    Answer,
    RangeAnswer,
    RangeFloor,
    RangeCeiling,
    OptionalMagicField,
    ShareRelease,
    DontMix,
}

impl AllowedAttribute {
    pub const ALL: [AllowedAttribute; 27] = [
        Self::Class,
        Self::Id,
        Self::Name,
        Self::Value,
        Self::Type,
        Self::For,
        Self::Checked,
        Self::Selected,
        Self::Placeholder,
        Self::Disabled,
        Self::Style,
        Self::Title,
        Self::Tabindex,
        Self::Href,
        Self::Src,
        Self::Alt,
        Self::RadioGroup,
        Self::Retained,
        Self::Weight,
        Self::PartialCredit,
        Self::Answer,
        Self::RangeAnswer,
        Self::RangeFloor,
        Self::RangeCeiling,
        Self::OptionalMagicField,
        Self::ShareRelease,
        Self::DontMix,
    ];

    /// HTML attribute name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Id => "id",
            Self::Name => "name",
            Self::Value => "value",
            Self::Type => "type",
            Self::For => "for",
            Self::Checked => "checked",
            Self::Selected => "selected",
            Self::Placeholder => "placeholder",
            Self::Disabled => "disabled",
            Self::Style => "style",
            Self::Title => "title",
            Self::Tabindex => "tabindex",
            Self::Href => "href",
            Self::Src => "src",
            Self::Alt => "alt",
            Self::RadioGroup => crate::shape::RADIO_GROUP_ATTR,
            Self::Retained => crate::retained::RETAINED_ATTR,
            Self::Weight => "data-bz-weight",
            Self::PartialCredit => "data-bz-partial-credit",
            Self::Answer => "data-bz-answer",
            Self::RangeAnswer => "data-bz-range-answer",
            Self::RangeFloor => "data-bz-range-flr",
            Self::RangeCeiling => "data-bz-range-cel",
            Self::OptionalMagicField => "data-bz-optional-magic-field",
            Self::ShareRelease => "data-bz-share-release",
            Self::DontMix => "data-bz-dont-mix",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

/// Whitelist projection shared by the load and export paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFilter {
    extra: BTreeSet<String>,
}

impl AttributeFilter {
    /// Built-in whitelist only
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in whitelist plus `names`
    pub fn with_extra<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extra: names
                .into_iter()
                .map(|n| n.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn allows(&self, name: &str) -> bool {
        AllowedAttribute::from_name(name).is_some() || self.extra.contains(name)
    }

    /// Allowed entries of `attrs`, in their original order
    pub fn filter(&self, attrs: &Attributes) -> Attributes {
        attrs
            .iter()
            .filter(|attr| self.allows(&attr.name))
            .map(|attr| (attr.name.as_str(), attr.value.as_str()))
            .collect()
    }

    /// Drop disallowed entries in place. Returns how many were dropped.
    pub fn filter_in_place(&self, attrs: &mut Attributes) -> usize {
        let before = attrs.len();
        attrs.retain(|attr| self.allows(&attr.name));
        before - attrs.len()
    }

    /// Apply the projection to every element of `tree`
    ///
    /// Returns the number of attributes dropped. Edits bypass mutation
    /// recording; filtering is not an authoring change.
    pub fn filter_tree(&self, tree: &mut DomTree) -> usize {
        let elements: Vec<_> = tree.descendants(tree.root()).elements().collect();
        let mut dropped = 0;
        for id in elements {
            if let Some(elem) = tree.element_mut(id) {
                dropped += self.filter_in_place(&mut elem.attrs);
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "dropped attributes outside the whitelist");
        }
        dropped
    }
}
