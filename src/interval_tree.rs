use crate::error::Result;
use crate::interval::Interval;
use crate::node::Node;
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An interval tree: an unbalanced binary search tree keyed on interval start
/// (ties go right), where each node caches the largest `high` of its subtree.
///
/// Insertion order decides the shape, so sorted input yields a chain of height
/// `n`. Queries, iteration and dropping walk the tree with explicit stacks and
/// stay safe on such chains; [`IntervalTree::remove`] recurses along one path.
/// Use [`IntervalTree::from_shuffled`] to get expected logarithmic height out
/// of presorted data.
///
/// The tree is not synchronized: concurrent mutation must be serialized by the
/// caller, e.g. behind a `Mutex`.
///
/// With the `serde` feature the tree (de)serializes as the pre-order list of its
/// intervals. Deserializing re-inserts them, which rebuilds the same shape and
/// recomputes every cached `max_end`.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K> Default for IntervalTree<K> {
    fn default() -> IntervalTree<K> {
        IntervalTree { root: None, len: 0 }
    }
}

impl<K> fmt::Display for IntervalTree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root {
            Some(ref root) => write!(f, "{}", root),
            None => write!(f, "{{}}"),
        }
    }
}

#[cfg(feature = "serde")]
impl<K: Serialize> Serialize for IntervalTree<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        let preorder = std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
            Some(&node.interval)
        });
        serializer.collect_seq(preorder)
    }
}

#[cfg(feature = "serde")]
impl<'de, K> Deserialize<'de> for IntervalTree<K>
where
    K: Deserialize<'de> + Ord + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let intervals = Vec::<Interval<K>>::deserialize(deserializer)?;
        Ok(IntervalTree::from_intervals(intervals))
    }
}

impl<K> Drop for IntervalTree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> IntervalTree<K> {
    /// Creates an empty tree.
    ///
    /// ```
    /// use sweep_interval_tree::IntervalTree;
    ///
    /// let tree = IntervalTree::<i32>::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> IntervalTree<K> {
        IntervalTree::default()
    }

    /// Number of stored intervals, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every interval without recursing through the nodes.
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K>, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            if node.is_leaf() {
                height = height.max(depth);
                continue;
            }
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// The largest `high` in the tree, if any.
    pub fn max_end(&self) -> Option<&K> {
        self.root.as_ref().map(|root| &root.max_end)
    }

    /// In-order iterator, i.e. sorted by `low` (equal starts in insertion order).
    ///
    /// ```
    /// use sweep_interval_tree::IntervalTree;
    ///
    /// let tree: IntervalTree<i32> = [(5, 9), (1, 2), (3, 4)].into_iter().collect();
    /// let lows: Vec<_> = tree.iter().map(|i| i.low).collect();
    /// assert_eq!(lows, vec![1, 3, 5]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

impl<K> IntervalTree<K>
where
    K: Ord + Clone,
{
    /// Builds a tree by inserting `intervals` in the given order.
    pub fn from_intervals<I, T>(intervals: I) -> IntervalTree<K>
    where
        I: IntoIterator<Item = T>,
        T: Into<Interval<K>>,
    {
        let mut tree = IntervalTree::new();
        tree.extend(intervals);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "built interval tree: {} intervals, height {}",
                tree.len(),
                tree.height()
            );
        }
        tree
    }

    /// Builds a tree after shuffling `intervals`, so already sorted input does not
    /// degenerate into a linked list.
    pub fn from_shuffled<I, T, R>(intervals: I, rng: &mut R) -> IntervalTree<K>
    where
        I: IntoIterator<Item = T>,
        T: Into<Interval<K>>,
        R: Rng + ?Sized,
    {
        let mut intervals: Vec<Interval<K>> = intervals.into_iter().map(Into::into).collect();
        intervals.shuffle(rng);
        IntervalTree::from_intervals(intervals)
    }

    /// Inserts `interval` as a new leaf. Never fails and never rebalances; an
    /// inverted interval is stored as is and is matched by queries exactly when
    /// [`Interval::overlaps`] holds for it.
    ///
    /// ```
    /// use sweep_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert((15, 20));
    /// tree.insert(Interval::new(10, 30));
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.max_end(), Some(&30));
    /// ```
    pub fn insert<T: Into<Interval<K>>>(&mut self, interval: T) {
        let interval = interval.into();
        let mut depth = 0;
        let mut slot = &mut self.root;
        // `max_end` can only grow on insert, so the path is fixed up on the way down.
        while let Some(node) = slot {
            node.maybe_update_max_end(&interval.high);
            depth += 1;
            slot = if interval.low < node.interval.low {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::new(interval)));
        self.len += 1;
        log::trace!("inserted interval at depth {}", depth);
    }

    /// Like [`IntervalTree::insert`], but rejects `low > high` and leaves the tree untouched.
    pub fn try_insert<T: Into<Interval<K>>>(&mut self, interval: T) -> Result<()>
    where
        K: fmt::Debug,
    {
        let interval = interval.into();
        let interval = Interval::try_new(interval.low, interval.high)?;
        self.insert(interval);
        Ok(())
    }

    /// Removes one stored interval equal to `interval`. Returns whether one was found.
    ///
    /// Unlike the queries this recurses once per level, so on a chain built from
    /// hundreds of thousands of sorted inserts it can exhaust the thread's stack.
    /// Build such trees with [`IntervalTree::from_shuffled`] if they need removal.
    ///
    /// ```
    /// use sweep_interval_tree::{Interval, IntervalTree};
    ///
    /// let mut tree = IntervalTree::from_intervals([(1, 5), (1, 5), (2, 3)]);
    /// assert!(tree.remove(&Interval::new(1, 5)));
    /// assert_eq!(tree.len(), 2);
    /// assert!(!tree.remove(&Interval::new(7, 8)));
    /// ```
    pub fn remove(&mut self, interval: &Interval<K>) -> bool {
        let Some(root) = self.root.take() else {
            return false;
        };
        let (root, removed) = root.remove(interval);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        log::trace!("remove: found = {}", removed);
        removed
    }

    /// Every stored interval overlapping `query` (closed ranges).
    ///
    /// Results come in in-order position among the visited nodes, which is
    /// sorted by `low` but otherwise not part of the contract.
    ///
    /// ```
    /// use sweep_interval_tree::{Interval, IntervalTree};
    ///
    /// let tree = IntervalTree::from_intervals([(15, 20), (10, 30), (17, 19), (5, 20), (12, 15), (30, 40)]);
    /// let found = tree.search_overlaps((14, 16));
    /// assert_eq!(
    ///     found,
    ///     vec![Interval::new(5, 20), Interval::new(10, 30), Interval::new(12, 15), Interval::new(15, 20)]
    /// );
    /// ```
    pub fn search_overlaps<T: Into<Interval<K>>>(&self, query: T) -> Vec<Interval<K>> {
        let query = query.into();
        let mut found = Vec::new();
        self.visit_overlaps(&query, |interval| {
            found.push(interval.clone());
            true
        });
        found
    }

    /// Every stored interval containing `point`.
    pub fn search_stabbing(&self, point: K) -> Vec<Interval<K>> {
        self.search_overlaps(Interval::point(point))
    }

    /// Whether any stored interval overlaps `query`. Stops at the first hit.
    pub fn overlaps_any<T: Into<Interval<K>>>(&self, query: T) -> bool {
        let mut hit = false;
        self.visit_overlaps(&query.into(), |_| {
            hit = true;
            false
        });
        hit
    }

    /// Whether any stored interval contains `point`.
    pub fn contains_point(&self, point: K) -> bool {
        self.overlaps_any(Interval::point(point))
    }

    /// Guided in-order descent over the nodes that can overlap `query`. `visit`
    /// returns `false` to stop early.
    ///
    /// The left child is skipped when its `max_end < query.low`; the right child
    /// when `node.low > query.high`, since every start there is at least `node.low`.
    fn visit_overlaps<'a, F>(&'a self, query: &Interval<K>, mut visit: F)
    where
        F: FnMut(&'a Interval<K>) -> bool,
    {
        let mut stack: Vec<&'a Node<K>> = Vec::new();
        let mut current = self.root.as_deref();
        let mut visited = 0usize;
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node
                    .left
                    .as_deref()
                    .filter(|left| left.max_end >= query.low);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            visited += 1;
            if node.interval.overlaps(query) && !visit(&node.interval) {
                break;
            }
            current = if node.interval.low <= query.high {
                node.right.as_deref()
            } else {
                None
            };
        }
        log::trace!("overlap query visited {} of {} nodes", visited, self.len);
    }
}

impl<K, T> Extend<T> for IntervalTree<K>
where
    K: Ord + Clone,
    T: Into<Interval<K>>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, intervals: I) {
        for interval in intervals {
            self.insert(interval);
        }
    }
}

impl<K, T> FromIterator<T> for IntervalTree<K>
where
    K: Ord + Clone,
    T: Into<Interval<K>>,
{
    fn from_iter<I: IntoIterator<Item = T>>(intervals: I) -> IntervalTree<K> {
        IntervalTree::from_intervals(intervals)
    }
}

impl<'a, K> IntoIterator for &'a IntervalTree<K> {
    type Item = &'a Interval<K>;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the intervals of an [`IntervalTree`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a Interval<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.interval)
    }
}
