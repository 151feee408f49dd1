//! Ball storage
//!
//! Balls live in a slot arena. Slots are linked in insertion order by index,
//! so iteration order is creation order even after removed slots get reused.
//! Handles carry a generation and stop resolving once their ball is removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Ball {
    /// Y coordinate of the lowest point of the ball (screen y grows downward)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// True once the whole circle is past the left or right edge
    #[inline]
    pub fn is_outside_horizontally(&self, width: f32) -> bool {
        self.pos.x + self.radius <= 0.0 || self.pos.x - self.radius >= width
    }
}

/// Stable reference to a ball in a [`Balls`] collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BallHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Entry {
    ball: Ball,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Ordered collection of live balls
#[derive(Debug, Clone)]
pub struct Balls {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
    /// Next ball ID (never reset, not even by `clear`)
    next_id: u32,
}

impl Default for Balls {
    fn default() -> Self {
        Self::new()
    }
}

impl Balls {
    /// Create an empty collection; the first ball gets id 1
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// ID the next added ball will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Append a ball at the end of the collection
    pub fn add(&mut self, pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> BallHandle {
        let id = self.next_id;
        self.next_id += 1;

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };

        let prev = self.tail;
        let slot = &mut self.slots[index as usize];
        slot.entry = Some(Entry {
            ball: Ball {
                id,
                pos,
                vel,
                radius,
                mass,
            },
            prev,
            next: None,
        });
        let generation = slot.generation;

        match prev {
            Some(tail) => {
                if let Some(entry) = self.entry_mut(tail) {
                    entry.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        BallHandle { index, generation }
    }

    /// Remove a ball in O(1). Stale or foreign handles are ignored.
    pub fn remove(&mut self, handle: BallHandle) -> Option<Ball> {
        if self.head.is_none() {
            return None;
        }

        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);

        match entry.prev {
            Some(prev) => {
                if let Some(p) = self.entry_mut(prev) {
                    p.next = entry.next;
                }
            }
            None => self.head = entry.next,
        }
        match entry.next {
            Some(next) => {
                if let Some(n) = self.entry_mut(next) {
                    n.prev = entry.prev;
                }
            }
            None => self.tail = entry.prev,
        }
        self.len -= 1;

        Some(entry.ball)
    }

    /// Remove every ball. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        // Reuse low slots first
        self.free.reverse();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn contains(&self, handle: BallHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: BallHandle) -> Option<&Ball> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref().map(|e| &e.ball)
    }

    pub fn get_mut(&mut self, handle: BallHandle) -> Option<&mut Ball> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_mut().map(|e| &mut e.ball)
    }

    /// Borrow two different live balls mutably at once
    pub fn get_pair_mut(&mut self, a: BallHandle, b: BallHandle) -> Option<(&mut Ball, &mut Ball)> {
        let (i, j) = (a.index as usize, b.index as usize);
        if i == j || !self.contains(a) || !self.contains(b) {
            return None;
        }

        let (slot_a, slot_b) = if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        };

        Some((&mut slot_a.entry.as_mut()?.ball, &mut slot_b.entry.as_mut()?.ball))
    }

    /// Iterate balls in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            balls: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Snapshot of live handles in insertion order
    pub fn handles(&self) -> Vec<BallHandle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let slot = &self.slots[index as usize];
            let Some(entry) = slot.entry.as_ref() else {
                break;
            };
            handles.push(BallHandle {
                index,
                generation: slot.generation,
            });
            cursor = entry.next;
        }
        handles
    }

    fn entry_mut(&mut self, index: u32) -> Option<&mut Entry> {
        self.slots.get_mut(index as usize)?.entry.as_mut()
    }
}

/// Insertion-order iterator over a [`Balls`] collection
pub struct Iter<'a> {
    balls: &'a Balls,
    cursor: Option<u32>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Ball;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let entry = self.balls.slots.get(index as usize)?.entry.as_ref()?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&entry.ball)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> IntoIterator for &'a Balls {
    type Item = &'a Ball;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn add_at(balls: &mut Balls, x: f32) -> BallHandle {
        balls.add(Vec2::new(x, 0.0), Vec2::ZERO, 50.0, 10.0)
    }

    fn ids(balls: &Balls) -> Vec<u32> {
        balls.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut balls = Balls::new();
        let a = add_at(&mut balls, 0.0);
        let b = add_at(&mut balls, 1.0);
        assert_eq!(balls.get(a).unwrap().id, 1);
        assert_eq!(balls.get(b).unwrap().id, 2);
        assert_eq!(balls.len(), 2);
        assert_eq!(ids(&balls), vec![1, 2]);
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let mut balls = Balls::new();
        add_at(&mut balls, 0.0);
        let mid = add_at(&mut balls, 1.0);
        add_at(&mut balls, 2.0);

        let removed = balls.remove(mid).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(ids(&balls), vec![1, 3]);
        assert!(!balls.contains(mid));
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut balls = Balls::new();
        let first = add_at(&mut balls, 0.0);
        add_at(&mut balls, 1.0);
        let last = add_at(&mut balls, 2.0);

        balls.remove(first);
        balls.remove(last);
        assert_eq!(ids(&balls), vec![2]);

        // Tail was relinked, so appending still lands at the end
        add_at(&mut balls, 3.0);
        assert_eq!(ids(&balls), vec![2, 4]);
    }

    #[test]
    fn test_remove_stale_handle_is_noop() {
        let mut balls = Balls::new();
        let a = add_at(&mut balls, 0.0);
        assert!(balls.remove(a).is_some());
        assert!(balls.remove(a).is_none());

        // Slot is reused but the old handle stays dead
        let b = add_at(&mut balls, 1.0);
        assert!(balls.get(a).is_none());
        assert_eq!(balls.get(b).unwrap().id, 2);
    }

    #[test]
    fn test_remove_on_empty_is_noop() {
        let mut balls = Balls::new();
        let a = add_at(&mut balls, 0.0);
        balls.clear();
        assert!(balls.remove(a).is_none());
        assert!(balls.is_empty());
    }

    #[test]
    fn test_reused_slot_appends_at_tail() {
        let mut balls = Balls::new();
        let a = add_at(&mut balls, 0.0);
        add_at(&mut balls, 1.0);
        balls.remove(a);
        add_at(&mut balls, 2.0);
        assert_eq!(ids(&balls), vec![2, 3]);
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let mut balls = Balls::new();
        let a = add_at(&mut balls, 0.0);
        add_at(&mut balls, 1.0);
        balls.clear();
        assert!(balls.is_empty());
        assert_eq!(balls.iter().count(), 0);
        assert!(!balls.contains(a));

        let c = add_at(&mut balls, 2.0);
        assert_eq!(balls.get(c).unwrap().id, 3);
        assert_eq!(balls.next_id(), 4);
    }

    #[test]
    fn test_get_pair_mut() {
        let mut balls = Balls::new();
        let a = add_at(&mut balls, 0.0);
        let b = add_at(&mut balls, 1.0);

        assert!(balls.get_pair_mut(a, a).is_none());

        let (ba, bb) = balls.get_pair_mut(b, a).unwrap();
        assert_eq!(ba.id, 2);
        assert_eq!(bb.id, 1);
        ba.vel = Vec2::X;
        bb.vel = Vec2::Y;
        assert_eq!(balls.get(b).unwrap().vel, Vec2::X);
        assert_eq!(balls.get(a).unwrap().vel, Vec2::Y);

        balls.remove(b);
        assert!(balls.get_pair_mut(a, b).is_none());
    }

    #[test]
    fn test_nested_iteration() {
        let mut balls = Balls::new();
        for i in 0..4 {
            add_at(&mut balls, i as f32);
        }
        let pairs = balls
            .iter()
            .flat_map(|a| balls.iter().filter(move |b| b.id != a.id))
            .count();
        assert_eq!(pairs, 12);
        assert_eq!(balls.iter().size_hint(), (4, Some(4)));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Add),
            3 => (0usize..16).prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_ids_unique_and_increasing(ops in proptest::collection::vec(op(), 0..64)) {
            let mut balls = Balls::new();
            let mut handles: Vec<BallHandle> = Vec::new();
            let mut last_id = 0;

            for op in ops {
                match op {
                    Op::Add => {
                        let h = add_at(&mut balls, 0.0);
                        let id = balls.get(h).unwrap().id;
                        prop_assert!(id > last_id);
                        last_id = id;
                        handles.push(h);
                    }
                    Op::Remove(i) => {
                        if !handles.is_empty() {
                            let h = handles.remove(i % handles.len());
                            balls.remove(h);
                        }
                    }
                    Op::Clear => {
                        balls.clear();
                        handles.clear();
                    }
                }

                let live = ids(&balls);
                prop_assert_eq!(live.len(), balls.len());
                // Insertion order means ids are ascending along the list
                prop_assert!(live.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
