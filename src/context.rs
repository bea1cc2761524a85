use crate::config::RuntimeConfig;
use crate::def::*;
use crate::error::AllocationError;
use crate::heap::{CopyingCollector, GcStats, RootStack, SemiSpaceHeap};
use crate::structs::*;

///
/// The runtime context: one heap, the collector driving it, the root stack
/// generated code maintains, and the descriptors objects and frames point at.
/// Everything the allocation entry points touch is owned here.
///
pub struct Runtime {
  heap: SemiSpaceHeap,
  collector: CopyingCollector,
  roots: RootStack,
  descriptors: DescriptorTable,
  config: RuntimeConfig,
  last_gc: Option<GcStats>,
}

impl Runtime {
  pub fn new(config: RuntimeConfig) -> Result<Runtime, AllocationError> {
    let heap = SemiSpaceHeap::new(config.heap_size, config.zero_on_flip)?;
    return Ok(Runtime {
      heap,
      collector: CopyingCollector::new(),
      roots: RootStack::new(),
      descriptors: DescriptorTable::new(),
      config,
      last_gc: None,
    });
  }

  pub fn with_heap_size(heap_size: usize) -> Result<Runtime, AllocationError> {
    return Runtime::new(RuntimeConfig::new(heap_size));
  }

  /// Takes ownership of a class or frame descriptor for the lifetime of the runtime.
  pub fn define(&mut self, descriptor: TypeDescriptor) -> Descriptor {
    return self.descriptors.define(descriptor);
  }

  ///
  /// Allocates an object described by `descriptor`. `size` is the whole record,
  /// header included, and must equal `size_of(&descriptor)`; any other size is
  /// an invalid request and yields `None`. Terminates the process when the heap
  /// is exhausted even after a collection.
  ///
  pub fn new_object(&mut self, descriptor: Descriptor, size: usize) -> Option<Reference> {
    return match self.try_new_object(descriptor, size) {
      Ok(reference) => reference,
      Err(err) => out_of_memory(err),
    };
  }

  /// Allocates a scalar array of `length` elements. Same policy as `new_object`.
  pub fn new_array(&mut self, length: usize) -> Option<Reference> {
    return match self.try_new_array(length) {
      Ok(reference) => reference,
      Err(err) => out_of_memory(err),
    };
  }

  pub fn try_new_object(&mut self, descriptor: Descriptor, size: usize) -> Result<Option<Reference>, AllocationError> {
    if size == 0 {
      return Ok(None);
    }
    let expected = size_of(&descriptor);
    if size != expected {
      log::warn!("rejected object of {} bytes, its descriptor needs {}", size, expected);
      return Ok(None);
    }
    let header = self.allocate(expected)?;
    return Ok(Some(unsafe { init_object_header(header, descriptor) }));
  }

  pub fn try_new_array(&mut self, length: usize) -> Result<Option<Reference>, AllocationError> {
    if length == 0 {
      return Ok(None);
    }
    if length > u32::MAX as usize {
      return Err(AllocationError::OutOfMemory {
        requested: usize::MAX,
        available: self.heap.available(),
      });
    }
    let size = match length.checked_mul(SCALAR_SIZE).and_then(|payload| payload.checked_add(HEADER_SIZE)) {
      Some(size) => size,
      None => {
        return Err(AllocationError::OutOfMemory {
          requested: usize::MAX,
          available: self.heap.available(),
        })
      }
    };
    debug_assert_eq!(size, size_of_array(length));
    let header = self.allocate(size)?;
    return Ok(Some(unsafe { init_array_header(header, length as u32) }));
  }

  /// Bump allocation with a single collect-then-retry on failure.
  fn allocate(&mut self, size: usize) -> Result<Addr, AllocationError> {
    if let Some(addr) = self.heap.try_allocate(size) {
      return Ok(addr);
    }

    self.collect();
    return match self.heap.try_allocate(size) {
      Some(addr) => Ok(addr),
      None => Err(AllocationError::OutOfMemory {
        requested: size,
        available: self.heap.available(),
      }),
    };
  }

  fn collect(&mut self) -> GcStats {
    let stats = self.collector.collect(&mut self.heap, &self.roots);
    if self.config.report_rounds {
      log::info!("{}", stats);
    }
    self.last_gc = Some(stats);
    return stats;
  }

  ///
  /// Runs `body` with `frame` installed on top of the root stack, the way
  /// generated code brackets a call.
  ///
  pub fn enter<R>(&mut self, frame: &mut Frame, body: impl FnOnce(&mut Runtime, &mut Frame) -> R) -> R {
    let record = frame.record();
    unsafe { self.roots.push(record) };
    let _guard = FrameGuard {
      roots: &mut self.roots as *mut RootStack,
      record,
    };
    return body(self, frame);
  }

  pub fn roots(&self) -> &RootStack {
    return &self.roots;
  }

  pub fn roots_mut(&mut self) -> &mut RootStack {
    return &mut self.roots;
  }

  pub fn heap(&self) -> &SemiSpaceHeap {
    return &self.heap;
  }

  pub fn config(&self) -> &RuntimeConfig {
    return &self.config;
  }

  pub fn rounds(&self) -> u32 {
    return self.collector.rounds();
  }

  pub fn last_gc(&self) -> Option<GcStats> {
    return self.last_gc;
  }
}

impl std::fmt::Debug for Runtime {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(
      f,
      "Runtime {{ heap: {:?}, frames: {}, descriptors: {}, rounds: {} }}",
      self.heap,
      self.roots.depth(),
      self.descriptors.len(),
      self.rounds()
    );
  }
}

/// Restores the root stack below `record` when `Runtime::enter` returns or unwinds.
struct FrameGuard {
  roots: *mut RootStack,
  record: *mut FrameRecord,
}

impl Drop for FrameGuard {
  fn drop(&mut self) {
    unsafe {
      if !std::thread::panicking() {
        debug_assert_eq!((*self.roots).top(), self.record, "Unbalanced frame push and pop");
      }
      (*self.roots).set_top((*self.record).prev());
    }
  }
}

fn out_of_memory(err: AllocationError) -> ! {
  log::error!("{}", err);
  eprintln!("OutOfMemory");
  std::process::exit(1);
}
