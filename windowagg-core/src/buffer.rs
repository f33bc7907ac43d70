/// Fixed-capacity circular buffer holding the most recent values.
///
/// Storage grows up to `capacity` and is then overwritten in place at a
/// running write pointer, so memory stays bounded and a push never shifts
/// existing values. Iteration yields values oldest first.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    capacity: usize,
    /// Slot overwritten by the next push once the buffer is full; this is
    /// also the position of the oldest value.
    head: usize,
}

impl<T> RingBuffer<T> {
    /// A buffer of zero capacity retains nothing: every push is evicted
    /// immediately.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Append `value`, returning the evicted oldest value if the buffer was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(value);
        }
        if self.slots.len() < self.capacity {
            self.slots.push(value);
            return None;
        }
        let evicted = std::mem::replace(&mut self.slots[self.head], value);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.slots.len() == self.capacity
    }

    /// Contents as two slices, oldest values in the first.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (newer, older) = self.slots.split_at(self.head);
        (older, newer)
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer)
    }

    /// Most recently pushed value.
    pub fn newest(&self) -> Option<&T> {
        self.iter().next_back()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Chain<std::slice::Iter<'a, T>, std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer.iter())
    }
}

#[cfg(test)]
#[path = "tests/buffer_tests.rs"]
mod tests;
