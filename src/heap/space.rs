use crate::def::*;

/// One semi-space: a fixed extent inside the heap region.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Space {
  start: Addr,
  size: usize,
}

impl Space {
  pub fn new(start: Addr, size: usize) -> Space {
    return Space { start, size };
  }

  pub fn start(&self) -> Addr {
    return self.start;
  }

  pub fn size(&self) -> usize {
    return self.size;
  }

  pub fn end(&self) -> Addr {
    return unsafe { self.start.add(self.size) };
  }

  pub fn contains(&self, addr: Addr) -> bool {
    return addr >= self.start && addr < self.end();
  }

  /// Byte distance of `addr` from the start of this space.
  pub fn offset_of(&self, addr: Addr) -> usize {
    debug_assert!(addr >= self.start && addr <= self.end());
    return addr as usize - self.start as usize;
  }

  pub unsafe fn zero(&self) {
    std::ptr::write_bytes(self.start, 0, self.size);
  }
}

impl std::fmt::Debug for Space {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "Space [{:p}, {:p})", self.start, self.end());
  }
}
