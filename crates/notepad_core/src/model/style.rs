//! Character style model.
//!
//! # Responsibility
//! - Define the three supported attributes and their additive combination.
//! - Define the styled interval shared by the engine, the codec and callers.
//!
//! # Invariants
//! - Bold and italic occupy the persisted font-style bits `1` and `2`.
//! - Underline is carried in the same set but persisted as a separate flag.
//! - A `StyleInterval` stored by the engine always has `length > 0`.

use serde::{Deserialize, Serialize};

/// Persisted font-style bit for bold text.
pub const FONT_STYLE_BOLD: u32 = 1;
/// Persisted font-style bit for italic text.
pub const FONT_STYLE_ITALIC: u32 = 2;

const FONT_STYLE_MASK: u8 = (FONT_STYLE_BOLD | FONT_STYLE_ITALIC) as u8;
const UNDERLINE_BIT: u8 = 4;

/// One independently toggleable character attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleAttribute {
    Bold,
    Italic,
    Underline,
}

impl StyleAttribute {
    /// All attributes in canonical order.
    pub const ALL: [StyleAttribute; 3] = [Self::Bold, Self::Italic, Self::Underline];

    const fn bit(self) -> u8 {
        match self {
            Self::Bold => FONT_STYLE_BOLD as u8,
            Self::Italic => FONT_STYLE_ITALIC as u8,
            Self::Underline => UNDERLINE_BIT,
        }
    }
}

/// Additive set of `StyleAttribute` values.
///
/// Underline shares the bitmask with bold/italic so merge logic stays
/// uniform; the codec splits it back out into its own field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<StyleAttribute>", from = "Vec<StyleAttribute>")]
pub struct AttributeSet(u8);

impl AttributeSet {
    /// Unstyled text.
    pub const EMPTY: AttributeSet = AttributeSet(0);

    /// Set holding exactly one attribute.
    pub const fn only(attribute: StyleAttribute) -> Self {
        Self(attribute.bit())
    }

    /// Returns a copy of this set with `attribute` added.
    pub const fn with(self, attribute: StyleAttribute) -> Self {
        Self(self.0 | attribute.bit())
    }

    /// Returns the union of both sets.
    pub const fn union(self, other: AttributeSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, attribute: StyleAttribute) -> bool {
        self.0 & attribute.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates contained attributes in canonical order.
    pub fn iter(self) -> impl Iterator<Item = StyleAttribute> {
        StyleAttribute::ALL
            .into_iter()
            .filter(move |attribute| self.contains(*attribute))
    }

    /// Persisted font-style bitmask (`0` normal, `1` bold, `2` italic, `3` both).
    pub const fn font_style(self) -> u32 {
        (self.0 & FONT_STYLE_MASK) as u32
    }

    pub const fn is_underlined(self) -> bool {
        self.contains(StyleAttribute::Underline)
    }

    /// Rebuilds a set from its persisted fields.
    ///
    /// Bits outside bold/italic are ignored.
    pub const fn from_encoded(font_style: u32, underline: bool) -> Self {
        let bits = (font_style & FONT_STYLE_MASK as u32) as u8;
        if underline {
            Self(bits | UNDERLINE_BIT)
        } else {
            Self(bits)
        }
    }
}

impl From<StyleAttribute> for AttributeSet {
    fn from(value: StyleAttribute) -> Self {
        Self::only(value)
    }
}

impl From<Vec<StyleAttribute>> for AttributeSet {
    fn from(value: Vec<StyleAttribute>) -> Self {
        value.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<AttributeSet> for Vec<StyleAttribute> {
    fn from(value: AttributeSet) -> Self {
        value.iter().collect()
    }
}

impl FromIterator<StyleAttribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = StyleAttribute>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// Contiguous run of characters sharing one attribute combination.
///
/// Offsets count `char`s of the owning tab's current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleInterval {
    pub start: usize,
    pub length: usize,
    pub attributes: AttributeSet,
}

impl StyleInterval {
    pub fn new(start: usize, length: usize, attributes: impl Into<AttributeSet>) -> Self {
        Self {
            start,
            length,
            attributes: attributes.into(),
        }
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    /// Whether this interval shares at least one character with `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeSet, StyleAttribute, StyleInterval};

    #[test]
    fn font_style_bits_exclude_underline() {
        let set = AttributeSet::only(StyleAttribute::Bold)
            .with(StyleAttribute::Italic)
            .with(StyleAttribute::Underline);
        assert_eq!(set.font_style(), 3);
        assert!(set.is_underlined());
    }

    #[test]
    fn from_encoded_masks_unknown_bits() {
        let set = AttributeSet::from_encoded(8 | 2, false);
        assert_eq!(set, AttributeSet::only(StyleAttribute::Italic));
    }

    #[test]
    fn iter_yields_canonical_order() {
        let set: AttributeSet = [StyleAttribute::Underline, StyleAttribute::Bold]
            .into_iter()
            .collect();
        let listed: Vec<_> = set.iter().collect();
        assert_eq!(listed, vec![StyleAttribute::Bold, StyleAttribute::Underline]);
    }

    #[test]
    fn end_saturates_instead_of_overflowing() {
        let interval = StyleInterval::new(usize::MAX - 1, 5, StyleAttribute::Bold);
        assert_eq!(interval.end(), usize::MAX);
    }

    #[test]
    fn overlaps_treats_end_as_exclusive() {
        let interval = StyleInterval::new(5, 5, StyleAttribute::Bold);
        assert!(!interval.overlaps(0, 5));
        assert!(interval.overlaps(0, 6));
        assert!(!interval.overlaps(10, 12));
    }
}
