//! The ordered "correlation video" of response maps.

use crate::response::{PeakLocation, ResponseMap};

/// Response maps for consecutive frame pairs, in temporal order.
///
/// Entry `i` correlates source frame `i` with frame `i + 1`, so a sweep of
/// N frames yields N - 1 maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationSequence {
    maps: Vec<ResponseMap>,
}

impl CorrelationSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            maps: Vec::with_capacity(capacity),
        }
    }

    /// Append the map for the next frame pair.
    pub fn push(&mut self, map: ResponseMap) {
        self.maps.push(map);
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResponseMap> {
        self.maps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResponseMap> {
        self.maps.iter()
    }

    pub fn as_slice(&self) -> &[ResponseMap] {
        &self.maps
    }

    /// Peak location of every map, in order.
    ///
    /// `None` if any map is empty, so indices always line up with maps.
    pub fn peaks(&self) -> Option<Vec<PeakLocation>> {
        self.maps.iter().map(ResponseMap::peak).collect()
    }
}

impl From<Vec<ResponseMap>> for CorrelationSequence {
    fn from(maps: Vec<ResponseMap>) -> Self {
        Self { maps }
    }
}

impl FromIterator<ResponseMap> for CorrelationSequence {
    fn from_iter<I: IntoIterator<Item = ResponseMap>>(iter: I) -> Self {
        Self {
            maps: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CorrelationSequence {
    type Item = ResponseMap;
    type IntoIter = std::vec::IntoIter<ResponseMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.maps.into_iter()
    }
}

impl<'a> IntoIterator for &'a CorrelationSequence {
    type Item = &'a ResponseMap;
    type IntoIter = std::slice::Iter<'a, ResponseMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.maps.iter()
    }
}
