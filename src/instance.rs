//! Bin packing of strips into fixed-capacity geometry instances.

use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    strip::Strip,
};

/// Strips dispatched together by one iteration of a fixed-size geometry stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Instance {
    strips: Vec<Strip>,
    vertex_count: usize,
}

impl Instance {
    #[inline]
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// The sum of the lengths of every strip in this instance.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn push(&mut self, strip: Strip) {
        self.vertex_count += strip.len();
        self.strips.push(strip);
    }
}

impl FromIterator<Strip> for Instance {
    fn from_iter<I: IntoIterator<Item = Strip>>(iter: I) -> Self {
        let mut res = Self::default();
        for strip in iter {
            res.push(strip);
        }
        res
    }
}

/// Pack `strips` into instances of at most `capacity` vertices each.
///
/// Each instance is filled by repeatedly taking the longest strip that still fits, until none does.
/// Strips of equal length are taken in their order within `strips`.
///
/// # Errors
///
/// * `capacity < 3`
/// * some strip is longer than `capacity`
#[tracing::instrument(skip(strips), fields(strips = strips.len()))]
pub fn pack_instances(strips: Vec<Strip>, capacity: usize) -> Result<Vec<Instance>> {
    if capacity < 3 {
        return Err(Error::InstanceCapacityTooSmall(capacity));
    }
    if let Some(longest) = strips.iter().map(Strip::len).max() {
        if longest > capacity {
            return Err(Error::StripExceedsInstance {
                strip: longest,
                capacity,
            });
        }
    }

    // length -> strips of that length, in reverse input order so that `pop` yields the first
    let mut by_length: BTreeMap<usize, Vec<Strip>> = BTreeMap::new();
    for strip in strips.into_iter().rev() {
        by_length.entry(strip.len()).or_default().push(strip);
    }

    let mut instances = Vec::new();
    let mut current = Instance::default();
    while !by_length.is_empty() {
        let room = capacity - current.vertex_count();
        let fitting = by_length.range(..=room).next_back().map(|(&len, _)| len);
        let Some(length) = fitting else {
            if current.is_empty() {
                // unreachable while every strip fits an empty instance
                return Err(Error::InstanceCapacityTooSmall(capacity));
            }
            tracing::trace!(vertices = current.vertex_count(), "closing instance");
            instances.push(std::mem::take(&mut current));
            continue;
        };

        if let std::collections::btree_map::Entry::Occupied(mut group) = by_length.entry(length) {
            if let Some(strip) = group.get_mut().pop() {
                current.push(strip);
            }
            if group.get().is_empty() {
                group.remove();
            }
        }
    }
    if !current.is_empty() {
        tracing::trace!(vertices = current.vertex_count(), "closing instance");
        instances.push(current);
    }

    tracing::debug!(instances = instances.len(), "packed strips into instances");
    Ok(instances)
}
