use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue is empty")]
    Empty,
    #[error("index {index} out of range for queue of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: Option<T>,
    prev: Option<u32>,
    next: Option<u32>,
}

/// Doubly-linked deque with indexed access and indexed erase.
///
/// Links are indices into a node arena; erased nodes go on a free list and
/// are recycled by later pushes. Used for both robot registries, so
/// `erase_at` and front-to-back rotation are the hot paths.
///
/// ```text
///          head                            tail
/// None <- [prev|v|next] <-> [prev|v|next] <-> [prev|v|next] -> None
/// ```
#[derive(Clone)]
pub struct EntityQueue<T> {
    nodes: Vec<Node<T>>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl<T> Default for EntityQueue<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<T> EntityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Result<&T, QueueError> {
        let idx = self.head.ok_or(QueueError::Empty)?;
        Ok(self.value(idx))
    }

    pub fn back(&self) -> Result<&T, QueueError> {
        let idx = self.tail.ok_or(QueueError::Empty)?;
        Ok(self.value(idx))
    }

    pub fn push_back(&mut self, value: T) {
        let idx = self.alloc(value, self.tail, None);
        match self.tail {
            Some(tail) => self.nodes[tail as usize].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    pub fn push_front(&mut self, value: T) {
        let idx = self.alloc(value, None, self.head);
        match self.head {
            Some(head) => self.nodes[head as usize].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Result<T, QueueError> {
        let idx = self.head.ok_or(QueueError::Empty)?;
        Ok(self.unlink(idx))
    }

    pub fn pop_back(&mut self) -> Result<T, QueueError> {
        let idx = self.tail.ok_or(QueueError::Empty)?;
        Ok(self.unlink(idx))
    }

    /// Element at position `index`, counting from the front.
    pub fn get(&self, index: usize) -> Result<&T, QueueError> {
        let idx = self.node_at(index)?;
        Ok(self.value(idx))
    }

    /// Removes and returns the element at `index`; later elements shift one
    /// place towards the front.
    pub fn erase_at(&mut self, index: usize) -> Result<T, QueueError> {
        let idx = self.node_at(index)?;
        Ok(self.unlink(idx))
    }

    /// Index of the first element matching `predicate`.
    pub fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.iter().position(|value| predicate(value))
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Moves the whole chain out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn alloc(&mut self, value: T, prev: Option<u32>, next: Option<u32>) -> u32 {
        let node = Node {
            value: Some(value),
            prev,
            next,
        };
        if let Some(idx) = self.free.pop() {
            self.nodes[idx as usize] = node;
            idx
        } else {
            let idx = self.nodes.len() as u32;
            self.nodes.push(node);
            idx
        }
    }

    fn unlink(&mut self, idx: u32) -> T {
        let node = &mut self.nodes[idx as usize];
        let prev = node.prev.take();
        let next = node.next.take();
        let value = node.value.take().expect("linked node holds a value");

        match prev {
            Some(p) => self.nodes[p as usize].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n as usize].prev = prev,
            None => self.tail = prev,
        }

        self.free.push(idx);
        self.len -= 1;
        value
    }

    /// Arena slot of the element at `index`, walking from the nearer end.
    fn node_at(&self, index: usize) -> Result<u32, QueueError> {
        if index >= self.len {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let mut cursor;
        if index <= self.len / 2 {
            cursor = self.head;
            for _ in 0..index {
                cursor = cursor.and_then(|c| self.nodes[c as usize].next);
            }
        } else {
            cursor = self.tail;
            for _ in 0..(self.len - 1 - index) {
                cursor = cursor.and_then(|c| self.nodes[c as usize].prev);
            }
        }

        cursor.ok_or(QueueError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    fn value(&self, idx: u32) -> &T {
        self.nodes[idx as usize]
            .value
            .as_ref()
            .expect("linked node holds a value")
    }
}

impl<T: fmt::Debug> fmt::Debug for EntityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for EntityQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for EntityQueue<T> {}

pub struct Iter<'a, T> {
    queue: &'a EntityQueue<T>,
    cursor: Option<u32>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.queue.nodes[idx as usize];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a EntityQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for EntityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = EntityQueue::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for EntityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}
