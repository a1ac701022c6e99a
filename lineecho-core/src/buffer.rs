//! Fixed-capacity line buffer
//!
//! Bytes are appended at the write index and drained from the read index.
//! Both indices wrap modulo the capacity and both restart at zero whenever
//! a new word begins, i.e. a byte arrives while the buffer is empty.

/// Capacity used by the echo demos
pub const DEFAULT_CAPACITY: usize = 64;

/// Byte buffer holding one line
#[derive(Debug, Clone)]
pub struct LineBuffer<const N: usize> {
    data: [u8; N],
    count: usize,
    write_index: usize,
    read_index: usize,
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            count: 0,
            write_index: 0,
            read_index: 0,
        }
    }

    /// Append a byte
    ///
    /// Returns `false` if the buffer is full and the byte was not stored.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.count == 0 {
            self.write_index = 0;
            self.read_index = 0;
        }

        if self.count >= N {
            return false;
        }

        self.data[self.write_index] = byte;
        self.write_index = (self.write_index + 1) % N;
        self.count += 1;
        true
    }

    /// Take the oldest byte
    pub fn pop(&mut self) -> Option<u8> {
        if self.count == 0 {
            return None;
        }

        let byte = self.data[self.read_index];
        self.read_index = (self.read_index + 1) % N;
        self.count -= 1;
        Some(byte)
    }

    /// Look at the oldest byte without removing it
    pub fn peek(&self) -> Option<u8> {
        if self.count == 0 {
            None
        } else {
            Some(self.data[self.read_index])
        }
    }

    /// Number of bytes currently held
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Next slot to fill
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Next slot to drain
    pub fn read_index(&self) -> usize {
        self.read_index
    }

    /// Drop all held bytes
    pub fn clear(&mut self) {
        self.count = 0;
        self.write_index = 0;
        self.read_index = 0;
    }

    /// Iterate over the held bytes, oldest first
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.count).map(move |i| self.data[(self.read_index + i) % N])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut buf = LineBuffer::<4>::new();
        assert!(buf.push(1));
        assert!(buf.push(2));
        assert!(buf.push(3));
        assert_eq!(buf.len(), 3);

        assert_eq!(buf.pop(), Some(1));
        assert_eq!(buf.pop(), Some(2));
        assert_eq!(buf.pop(), Some(3));
        assert_eq!(buf.pop(), None);
    }

    #[test]
    fn test_full_drops() {
        let mut buf = LineBuffer::<2>::new();
        assert!(buf.push(b'a'));
        assert!(buf.push(b'b'));
        assert!(buf.is_full());
        assert!(!buf.push(b'c'));
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.iter().collect::<heapless::Vec<u8, 4>>(), [b'a', b'b']);
    }

    #[test]
    fn test_new_word_restarts_indices() {
        let mut buf = LineBuffer::<8>::new();
        buf.push(b'x');
        buf.push(b'y');
        buf.pop();
        buf.pop();
        assert_eq!(buf.write_index(), 2);

        buf.push(b'z');
        assert_eq!(buf.write_index(), 1);
        assert_eq!(buf.read_index(), 0);
        assert_eq!(buf.peek(), Some(b'z'));
    }

    #[test]
    fn test_indices_wrap_while_draining() {
        let mut buf = LineBuffer::<3>::new();
        buf.push(1);
        buf.push(2);
        buf.push(3);
        assert_eq!(buf.write_index(), 0);

        // Refill the freed slot while the rest is still draining
        assert_eq!(buf.pop(), Some(1));
        assert!(buf.push(4));
        assert_eq!(buf.iter().collect::<heapless::Vec<u8, 3>>(), [2, 3, 4]);

        assert_eq!(buf.pop(), Some(2));
        assert_eq!(buf.pop(), Some(3));
        assert_eq!(buf.pop(), Some(4));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut buf = LineBuffer::<DEFAULT_CAPACITY>::new();
        buf.push(b'q');
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 64);
    }
}
