//! What a tree node carries: either one interval, or every distinct interval
//! sharing one pair of bounds.

use std::collections::hash_set;
use std::collections::HashSet;
use std::hash::Hash;
use std::option;

use crate::interval::Interval;

/// Capabilities the balancing engine needs from a node's contents.
///
/// Every member of a payload has the same bounds; the engine only ever looks
/// at those bounds, never at how many members there are.
pub trait Payload {
    /// The interval type stored in the tree.
    type Item: Interval;

    /// Iterator over the members of a payload.
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Owning iterator over the members of a payload.
    type IntoIter: Iterator<Item = Self::Item>;

    /// A payload holding exactly `item`.
    fn new(item: Self::Item) -> Self;

    /// Adds an item with the same bounds. Returns `false` if it was rejected.
    fn add(&mut self, item: Self::Item) -> bool;

    /// Removes the member matching `item`, returning it.
    fn remove(&mut self, item: &Self::Item) -> Option<Self::Item>;

    /// Checks if `item` is a member.
    fn contains(&self, item: &Self::Item) -> bool;

    /// Number of members.
    fn len(&self) -> usize;

    /// Checks if the last member is gone.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the members.
    fn members(&self) -> Self::Iter<'_>;

    /// Consumes the payload, yielding its members.
    fn into_members(self) -> Self::IntoIter;
}

/// One interval per key. A second interval with the same bounds is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Single<I> {
    item: Option<I>,
}

impl<I> Single<I> {
    /// The stored interval.
    #[inline]
    pub fn get(&self) -> Option<&I> {
        self.item.as_ref()
    }
}

impl<I: Interval> Payload for Single<I> {
    type Item = I;
    type Iter<'a> = option::Iter<'a, I> where Self: 'a;
    type IntoIter = option::IntoIter<I>;

    fn new(item: I) -> Self {
        Self { item: Some(item) }
    }

    fn add(&mut self, _item: I) -> bool {
        false
    }

    /// Keys match by bounds alone, so whatever is stored goes.
    fn remove(&mut self, _item: &I) -> Option<I> {
        self.item.take()
    }

    fn contains(&self, item: &I) -> bool {
        self.item
            .as_ref()
            .is_some_and(|i| i.cmp_bounds(item).is_eq())
    }

    fn len(&self) -> usize {
        usize::from(self.item.is_some())
    }

    fn members(&self) -> Self::Iter<'_> {
        self.item.iter()
    }

    fn into_members(self) -> Self::IntoIter {
        self.item.into_iter()
    }
}

/// The set of distinct intervals that share one pair of bounds.
///
/// Members are told apart by `Eq`/`Hash`, so two intervals with equal bounds
/// but different attached data are both kept. Iteration order is unspecified.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "I: serde::Serialize",
        deserialize = "I: serde::Deserialize<'de> + Eq + Hash"
    ))
)]
pub struct Members<I> {
    set: HashSet<I>,
}

impl<I: Eq + Hash> PartialEq for Members<I> {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
    }
}

impl<I: Eq + Hash> Eq for Members<I> {}

impl<I: Eq + Hash> Members<I> {
    /// Iterates over the members.
    #[inline]
    pub fn iter(&self) -> hash_set::Iter<'_, I> {
        self.set.iter()
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Always `false` for a set reachable from a tree.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Checks if `item` is a member.
    #[inline]
    pub fn contains(&self, item: &I) -> bool {
        self.set.contains(item)
    }
}

impl<'a, I: Eq + Hash> IntoIterator for &'a Members<I> {
    type Item = &'a I;
    type IntoIter = hash_set::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

impl<I: Interval + Eq + Hash> Payload for Members<I> {
    type Item = I;
    type Iter<'a> = hash_set::Iter<'a, I> where Self: 'a;
    type IntoIter = hash_set::IntoIter<I>;

    fn new(item: I) -> Self {
        let mut set = HashSet::with_capacity(1);
        set.insert(item);
        Self { set }
    }

    fn add(&mut self, item: I) -> bool {
        self.set.insert(item)
    }

    fn remove(&mut self, item: &I) -> Option<I> {
        self.set.take(item)
    }

    fn contains(&self, item: &I) -> bool {
        self.set.contains(item)
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn members(&self) -> Self::Iter<'_> {
        self.set.iter()
    }

    fn into_members(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::interval::Span;

    #[test]
    fn single_rejects_second_item() {
        let mut p = Single::new(Span::new(1, 3));
        assert!(!p.add(Span::new(1, 3)));
        assert_eq!(p.len(), 1);
        assert!(p.contains(&Span::new(1, 3)));
        assert_eq!(p.remove(&Span::new(1, 3)), Some(Span::new(1, 3)));
        assert!(p.is_empty());
        assert_eq!(p.members().count(), 0);
    }

    #[test]
    fn members_keep_distinct_values() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        struct Named(i64, i64, &'static str);
        impl Interval for Named {
            fn start(&self) -> i64 {
                self.0
            }
            fn end(&self) -> i64 {
                self.1
            }
        }

        let mut p = Members::new(Named(0, 5, "a"));
        assert!(p.add(Named(0, 5, "b")));
        assert!(!p.add(Named(0, 5, "a")));
        assert_eq!(Payload::len(&p), 2);
        assert_eq!(p.remove(&Named(0, 5, "a")), Some(Named(0, 5, "a")));
        assert!(p.remove(&Named(0, 5, "a")).is_none());
        assert!(!Payload::is_empty(&p));
    }

    #[test]
    fn members_compare_as_sets() {
        let mut a = Members::new(Span::new(0, 5));
        let _ignore = a.add(Span::new(0, 5));
        let b = Members::new(Span::new(0, 5));
        assert_eq!(a, b);
        assert_ne!(a, Members::new(Span::new(0, 6)));
        assert_eq!(Some(&a), Some(&b));
    }
}
