//! Opaque JSON elements and immutable snapshots of them.

use std::ops::Index;

use axum::body::Bytes;
use serde_json::value::RawValue;

/// One JSON value from the source array, kept as its original encoded bytes.
///
/// Cloning is cheap: the bytes are reference counted and shared by every
/// response that echoes this element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element(Bytes);

impl Element {
    /// Wrap an already-validated raw JSON value.
    pub fn from_raw(raw: &RawValue) -> Self {
        Self(Bytes::copy_from_slice(raw.get().as_bytes()))
    }

    /// The encoded bytes, exactly as they appeared in the file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Shared handle to the bytes, suitable as a response body.
    pub fn to_bytes(&self) -> Bytes {
        self.0.clone()
    }
}

/// One generation of the dataset: an ordered, 0-indexed, immutable sequence
/// of elements in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    elements: Vec<Element>,
}

impl Snapshot {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }
}

impl Index<usize> for Snapshot {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.elements[index]
    }
}

impl From<Vec<Element>> for Snapshot {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}

#[cfg(test)]
impl Snapshot {
    /// Build a snapshot from literal JSON fragments.
    pub(crate) fn from_json_fragments(fragments: &[&str]) -> Self {
        fragments
            .iter()
            .map(|f| Element(Bytes::copy_from_slice(f.as_bytes())))
            .collect::<Vec<_>>()
            .into()
    }
}
