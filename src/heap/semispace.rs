use super::allocator::Region;
use super::space::Space;
use crate::def::*;
use crate::error::AllocationError;
use std::ptr;

///
/// Two equal regions carved out of one mapping. Allocation bumps `free`
/// through the from-space; the collector evacuates into the to-space using
/// the `scan` and `copy` pointers, then `flip` swaps the roles.
///
pub struct SemiSpaceHeap {
  region: Region,
  from: Space,
  to: Space,
  free: Addr,
  scan: Addr,
  copy: Addr,
  zero_on_flip: bool,
}

impl SemiSpaceHeap {
  pub fn new(total_bytes: usize, zero_on_flip: bool) -> Result<SemiSpaceHeap, AllocationError> {
    let size = total_bytes / 2;
    if size == 0 {
      return Err(AllocationError::InvalidHeapSize { requested: total_bytes });
    }
    let region = Region::reserve(size * 2)?;
    let from = Space::new(region.start(), size);
    let to = Space::new(unsafe { region.start().add(size) }, size);
    log::debug!("heap initialized: {:?}, from {:?}, to {:?}", region, from, to);
    return Ok(SemiSpaceHeap {
      region,
      from,
      to,
      free: from.start(),
      scan: ptr::null_mut(),
      copy: ptr::null_mut(),
      zero_on_flip,
    });
  }

  /// Bumps the free pointer by `size`, or `None` when the from-space cannot hold it.
  pub fn try_allocate(&mut self, size: usize) -> Option<Addr> {
    if size > self.available() {
      return None;
    }
    let ret = self.free;
    self.free = unsafe { self.free.add(size) };
    return Some(ret);
  }

  /// Bytes per semi-space.
  pub fn capacity(&self) -> usize {
    return self.from.size();
  }

  pub fn used(&self) -> usize {
    return self.from.offset_of(self.free);
  }

  pub fn available(&self) -> usize {
    return self.capacity() - self.used();
  }

  pub fn from_space(&self) -> Space {
    return self.from;
  }

  pub fn to_space(&self) -> Space {
    return self.to;
  }

  pub fn free_pointer(&self) -> Addr {
    return self.free;
  }

  pub fn scan_pointer(&self) -> Addr {
    return self.scan;
  }

  pub fn copy_pointer(&self) -> Addr {
    return self.copy;
  }

  pub fn is_collecting(&self) -> bool {
    return !self.copy.is_null();
  }

  pub(crate) fn begin_collection(&mut self) {
    self.scan = self.to.start();
    self.copy = self.to.start();
  }

  /// Copies `size` bytes from `src` to the copy pointer and returns where they landed.
  pub(crate) unsafe fn evacuate(&mut self, src: Addr, size: usize) -> Addr {
    debug_assert!(self.is_collecting());
    debug_assert!(self.to.offset_of(self.copy) + size <= self.to.size(), "to-space overflow");
    let dest = self.copy;
    ptr::copy_nonoverlapping(src, dest, size);
    self.copy = dest.add(size);
    return dest;
  }

  /// The oldest copied-but-unscanned record, if any.
  pub(crate) fn next_unscanned(&self) -> Option<Addr> {
    if self.scan == self.copy {
      return None;
    }
    return Some(self.scan);
  }

  pub(crate) fn advance_scan(&mut self, size: usize) {
    self.scan = unsafe { self.scan.add(size) };
    debug_assert!(self.scan <= self.copy);
  }

  pub(crate) fn flip(&mut self) {
    debug_assert_eq!(self.scan, self.copy, "flip with an undrained scan queue");
    std::mem::swap(&mut self.from, &mut self.to);
    self.free = self.copy;
    self.scan = ptr::null_mut();
    self.copy = ptr::null_mut();
    if self.zero_on_flip {
      unsafe { self.to.zero() };
    }
  }
}

impl std::fmt::Debug for SemiSpaceHeap {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(
      f,
      "SemiSpaceHeap {{ region: {:?}, from: {:?}, to: {:?}, used: {} }}",
      self.region,
      self.from,
      self.to,
      self.used()
    );
  }
}
