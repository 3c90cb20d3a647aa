//! Fixed-capacity circular buffer with alive-range cursors
//!
//! Slots `[first_alive, first_dead)` (modulo capacity) hold live values.
//! Values are appended at `first_dead` and retired from `first_alive`, so the
//! buffer never reallocates and slot indices stay stable while a value lives.
//! That stability is what lets the renderer address a particle's quad by slot.

use std::ops::Range;

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    first_alive: usize,
    first_dead: usize,
    len: usize,
}

impl<T: Default + Clone> RingBuffer<T> {
    /// Allocate `capacity` default-initialized slots. Capacity must be non-zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            slots: vec![T::default(); capacity],
            first_alive: 0,
            first_dead: 0,
            len: 0,
        }
    }
}

impl<T> RingBuffer<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Slot holding the oldest live value
    pub fn first_alive(&self) -> usize {
        self.first_alive
    }

    /// Slot the next value will be written to
    pub fn first_dead(&self) -> usize {
        self.first_dead
    }

    #[inline]
    fn wrap(&self, index: usize) -> usize {
        index % self.capacity()
    }

    fn check_cursors(&self) {
        debug_assert!(self.first_alive < self.capacity());
        debug_assert!(self.first_dead < self.capacity());
        debug_assert!(self.len <= self.capacity());
        debug_assert_eq!(
            self.wrap(self.first_alive + self.len),
            self.first_dead,
            "alive range out of sync with live count"
        );
    }

    /// Append a value. Returns false (and drops the value) when full.
    pub fn push_back(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.first_dead] = value;
        self.first_dead = self.wrap(self.first_dead + 1);
        self.len += 1;
        self.check_cursors();
        true
    }

    /// Retire the oldest value. Its slot keeps the stale contents.
    pub fn pop_front(&mut self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.first_alive;
        self.first_alive = self.wrap(self.first_alive + 1);
        self.len -= 1;
        self.check_cursors();
        Some(&self.slots[slot])
    }

    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.first_alive])
        }
    }

    /// Live value at `slot`, if that slot is inside the alive range
    pub fn get(&self, slot: usize) -> Option<&T> {
        if slot < self.capacity() && self.is_alive_slot(slot) {
            Some(&self.slots[slot])
        } else {
            None
        }
    }

    fn is_alive_slot(&self, slot: usize) -> bool {
        let offset = (slot + self.capacity() - self.first_alive) % self.capacity();
        offset < self.len
    }

    /// Live slot indices, oldest first, across the wraparound
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        let (head, tail) = self.segments();
        head.chain(tail.unwrap_or(0..0))
    }

    /// Live values, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (head, tail) = self.segments();
        let (wrapped, front) = self.slots.split_at(head.start);
        let second = tail.map_or(&[][..], |range| &wrapped[range]);
        front[..head.len()].iter().chain(second.iter())
    }

    /// Live values, oldest first, paired with their slot
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        let (head, tail) = self.segments();
        let start = head.start;
        let head_len = head.len();
        let tail_len = tail.map_or(0, |range| range.len());
        let (wrapped, front) = self.slots.split_at_mut(start);
        front[..head_len]
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (start + i, v))
            .chain(wrapped[..tail_len].iter_mut().enumerate())
    }

    /// Contiguous slot ranges covering the alive values, oldest first.
    ///
    /// The second range is present only when the alive range wraps past the
    /// end of the buffer.
    pub fn segments(&self) -> (Range<usize>, Option<Range<usize>>) {
        if self.is_empty() {
            return (self.first_alive..self.first_alive, None);
        }
        let end = self.first_alive + self.len;
        if end <= self.capacity() {
            (self.first_alive..end, None)
        } else {
            (self.first_alive..self.capacity(), Some(0..self.first_dead))
        }
    }

    /// All slots including dead ones, indexed by slot
    pub fn raw_slots(&self) -> &[T] {
        &self.slots
    }
}
