use super::roots::{enumerate_roots, RootStack};
use super::semispace::SemiSpaceHeap;
use super::stats::GcStats;
use crate::def::*;
use crate::structs::{ObjectHeader, ObjectKind, TypeDescriptor, HEADER_SIZE};
use crate::structs::slot::{load_reference, store_reference};
use std::time::Instant;

///
/// Cheney's breadth-first copying collector.
///
/// Roots are evacuated first; the to-space between the scan and copy pointers
/// then serves as the queue of copied-but-unscanned records, so neither
/// recursion nor a work list is needed.
///
pub struct CopyingCollector {
  round: u32,
}

impl CopyingCollector {
  pub fn new() -> CopyingCollector {
    return CopyingCollector { round: 0 };
  }

  pub fn rounds(&self) -> u32 {
    return self.round;
  }

  pub fn collect(&mut self, heap: &mut SemiSpaceHeap, roots: &RootStack) -> GcStats {
    let start = Instant::now();
    let used_before = heap.used();

    heap.begin_collection();
    {
      let mut scavenger = Scavenger { heap: &mut *heap };
      enumerate_roots(roots, |base, map| scavenger.update_slots(base, map));
      scavenger.drain();
    }
    heap.flip();

    self.round += 1;
    let live_bytes = heap.used();
    return GcStats::new(self.round, start.elapsed(), live_bytes, used_before - live_bytes);
  }
}

impl Default for CopyingCollector {
  fn default() -> CopyingCollector {
    return CopyingCollector::new();
  }
}

struct Scavenger<'a> {
  heap: &'a mut SemiSpaceHeap,
}

impl<'a> Scavenger<'a> {
  ///
  /// Returns the to-space address of the object whose payload is at `reference`,
  /// copying it first unless this round already did. The original's forwarding
  /// field records the copy, so later visits resolve to the same address.
  ///
  fn relocate(&mut self, reference: Addr) -> Addr {
    let header_addr = unsafe { reference.sub(HEADER_SIZE) };
    let mut header = unsafe { ObjectHeader::load(header_addr) };
    if !self.heap.to_space().contains(header.forwarding()) {
      let size = header.record_size();
      let copied = unsafe { self.heap.evacuate(header_addr, size) };
      let mut copied_header = header;
      copied_header.set_forwarding(std::ptr::null_mut());
      header.set_forwarding(copied);
      unsafe {
        copied_header.store(copied);
        header.store(header_addr);
      }
      debug_log!("relocated {:p} -> {:p} ({} bytes)", header_addr, copied, size);
    }
    return unsafe { header.forwarding().add(HEADER_SIZE) };
  }

  /// Rewrites every non-null reference slot of the region at `base` in place.
  fn update_slots(&mut self, base: Addr, descriptor: &TypeDescriptor) {
    for offset in descriptor.reference_offsets() {
      let slot = unsafe { base.add(offset) };
      let value = unsafe { load_reference(slot) };
      if value.is_null() {
        continue;
      }
      let relocated = self.relocate(value);
      unsafe { store_reference(slot, relocated) };
    }
  }

  /// Scans queued records until the scan pointer catches the copy pointer.
  fn drain(&mut self) {
    while let Some(header_addr) = self.heap.next_unscanned() {
      let header = unsafe { ObjectHeader::load(header_addr) };
      match header.kind() {
        ObjectKind::Object => {
          if let Some(descriptor) = header.descriptor() {
            let payload = unsafe { header_addr.add(HEADER_SIZE) };
            self.update_slots(payload, &descriptor);
          }
        }
        // Arrays hold scalars only.
        ObjectKind::Array => {}
      }
      self.heap.advance_scan(header.record_size());
    }
  }
}
