use crate::interval::Interval;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Node<K> {
    pub interval: Interval<K>,
    pub max_end: K, // Max `high` in this subtree.
    pub left: Option<Box<Node<K>>>,
    pub right: Option<Box<Node<K>>>,
}

impl<K> fmt::Display for Node<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.left, &self.right) {
            (None, None) => write!(f, " {{ {} ({}) }} ", self.interval, self.max_end),
            (None, Some(right)) => write!(
                f,
                " {{ {} ({}) right:{}}} ",
                self.interval, self.max_end, right
            ),
            (Some(left), None) => write!(
                f,
                " {{ {} ({}) left:{}}} ",
                self.interval, self.max_end, left
            ),
            (Some(left), Some(right)) => write!(
                f,
                " {{ {} ({}) left:{}right:{}}} ",
                self.interval, self.max_end, left, right
            ),
        }
    }
}

impl<K> Node<K> {
    pub fn new(interval: Interval<K>) -> Node<K>
    where
        K: Clone,
    {
        let max_end = interval.high.clone();

        Node {
            interval,
            max_end,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Raises `max_end` to `inserted_high` if the latter is larger. Enough on
    /// the insertion path, since inserting can only grow a subtree's max.
    pub fn maybe_update_max_end(&mut self, inserted_high: &K)
    where
        K: PartialOrd + Clone,
    {
        if self.max_end < *inserted_high {
            self.max_end = inserted_high.clone();
        }
    }

    /// Recomputes `max_end` from scratch. Both children must already be up to date.
    pub fn update_max_end(&mut self)
    where
        K: PartialOrd + Clone,
    {
        self.max_end.clone_from(&self.interval.high);
        if let Some(ref left) = self.left {
            if left.max_end > self.max_end {
                self.max_end.clone_from(&left.max_end);
            }
        }
        if let Some(ref right) = self.right {
            if right.max_end > self.max_end {
                self.max_end.clone_from(&right.max_end);
            }
        }
    }
}

impl<K: PartialOrd + Clone> Node<K> {
    /// Removes one node holding exactly `target` from this subtree. Returns the
    /// new subtree root (`None` if it became empty) and whether anything was removed.
    pub fn remove(mut self: Box<Self>, target: &Interval<K>) -> (Option<Box<Self>>, bool) {
        // Equal starts always live in the right subtree.
        let removed = if target.low < self.interval.low {
            match self.left.take() {
                Some(left) => {
                    let (left, removed) = left.remove(target);
                    self.left = left;
                    removed
                }
                None => false,
            }
        } else if self.interval == *target {
            return (self.remove_root(), true);
        } else {
            match self.right.take() {
                Some(right) => {
                    let (right, removed) = right.remove(target);
                    self.right = right;
                    removed
                }
                None => false,
            }
        };

        if removed {
            self.update_max_end();
        }
        (Some(self), removed)
    }

    /// Drops this node, splicing its children back together. With two children the
    /// in-order successor takes its place, so ties keep going right.
    fn remove_root(mut self: Box<Self>) -> Option<Box<Self>> {
        match (self.left.take(), self.right.take()) {
            (None, None) => None,
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (Some(l), Some(r)) => {
                let (rest, mut successor) = r.drop_min();
                successor.left = Some(l);
                successor.right = rest;
                successor.update_max_end();
                Some(successor)
            }
        }
    }

    // Returns (remaining subtree, detached leftmost node).
    fn drop_min(mut self: Box<Self>) -> (Option<Box<Self>>, Box<Self>) {
        match self.left.take() {
            Some(left) => {
                let (new_left, min) = left.drop_min();
                self.left = new_left;
                self.update_max_end();
                (Some(self), min)
            }
            None => (self.right.take(), self),
        }
    }
}
