/// Assumed hardware cache line size in bytes.
pub const CACHE_LINE: usize = 64;

/// A per-worker result slot aligned to its own cache line.
///
/// Adjacent slots in a `Vec<PaddedSlot<T>>` never share a line, so workers
/// writing their own slot do not contend with each other.
#[repr(align(64))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddedSlot<T> {
    value: T,
}

impl<T> PaddedSlot<T> {
    pub fn new(value: T) -> Self {
        PaddedSlot { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
