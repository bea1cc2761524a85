use super::descriptor::{Descriptor, Slot, TypeDescriptor};
use super::object::Reference;
use super::slot;
use crate::def::*;
use std::mem::size_of;
use std::ptr;

///
/// One link of the chain of active frames, as laid out by generated code.
/// The frame's local slots follow the record immediately in memory.
///
/// |--prev--|--argument base--|--argument map--|--locals map--|--locals...
///
#[repr(C)]
pub struct FrameRecord {
  prev: *mut FrameRecord,
  argument_base: Addr,
  argument_map: *const TypeDescriptor,
  locals_map: *const TypeDescriptor,
}

pub const FRAME_RECORD_SIZE: usize = size_of::<FrameRecord>();
const_assert_eq!(FRAME_RECORD_SIZE, 4 * PTR_SIZE);

impl FrameRecord {
  pub fn new(argument_base: Addr, argument_map: Option<Descriptor>, locals_map: Option<Descriptor>) -> FrameRecord {
    return FrameRecord {
      prev: ptr::null_mut(),
      argument_base,
      argument_map: argument_map.map_or(ptr::null(), |d| d.as_ptr()),
      locals_map: locals_map.map_or(ptr::null(), |d| d.as_ptr()),
    };
  }

  pub fn prev(&self) -> *mut FrameRecord {
    return self.prev;
  }

  pub fn set_prev(&mut self, prev: *mut FrameRecord) {
    self.prev = prev;
  }

  pub fn argument_base(&self) -> Addr {
    return self.argument_base;
  }

  pub fn argument_map(&self) -> Option<Descriptor> {
    return unsafe { Descriptor::from_raw(self.argument_map) };
  }

  pub fn locals_map(&self) -> Option<Descriptor> {
    return unsafe { Descriptor::from_raw(self.locals_map) };
  }

  pub fn locals_base(&self) -> Addr {
    return unsafe { (self as *const FrameRecord as Addr).add(FRAME_RECORD_SIZE) };
  }
}

///
/// An owned frame for hosts that are not generated code: the record and its
/// locals share one heap buffer so the record address survives moves of `Frame`.
///
pub struct Frame {
  storage: Box<[usize]>,
  arguments: Box<[usize]>,
}

fn words(bytes: usize) -> usize {
  return (bytes + PTR_SIZE - 1) / PTR_SIZE;
}

impl Frame {
  pub fn new(argument_map: Option<Descriptor>, locals_map: Option<Descriptor>) -> Frame {
    let locals_size = locals_map.map_or(0, |d| d.payload_size());
    let arguments_size = argument_map.map_or(0, |d| d.payload_size());
    let mut storage = vec![0usize; words(FRAME_RECORD_SIZE + locals_size)].into_boxed_slice();
    let mut arguments = vec![0usize; words(arguments_size)].into_boxed_slice();
    let record = FrameRecord::new(arguments.as_mut_ptr() as Addr, argument_map, locals_map);
    unsafe { ptr::write(storage.as_mut_ptr() as *mut FrameRecord, record) };
    return Frame { storage, arguments };
  }

  pub fn record(&mut self) -> *mut FrameRecord {
    return self.storage.as_mut_ptr() as *mut FrameRecord;
  }

  fn record_ref(&self) -> &FrameRecord {
    return unsafe { &*(self.storage.as_ptr() as *const FrameRecord) };
  }

  pub fn argument(&self, index: usize) -> Option<Reference> {
    let record = self.record_ref();
    let addr = slot_addr(record.argument_base(), record.argument_map(), index, Slot::Reference);
    return unsafe { Reference::from_addr(slot::load_reference(addr)) };
  }

  pub fn set_argument(&mut self, index: usize, value: Option<Reference>) {
    let record = self.record_ref();
    let addr = slot_addr(record.argument_base(), record.argument_map(), index, Slot::Reference);
    unsafe { slot::store_reference(addr, Reference::into_addr(value)) };
  }

  pub fn argument_scalar(&self, index: usize) -> i32 {
    let record = self.record_ref();
    let addr = slot_addr(record.argument_base(), record.argument_map(), index, Slot::Scalar);
    return unsafe { slot::load_scalar(addr) };
  }

  pub fn set_argument_scalar(&mut self, index: usize, value: i32) {
    let record = self.record_ref();
    let addr = slot_addr(record.argument_base(), record.argument_map(), index, Slot::Scalar);
    unsafe { slot::store_scalar(addr, value) };
  }

  pub fn local(&self, index: usize) -> Option<Reference> {
    let record = self.record_ref();
    let addr = slot_addr(record.locals_base(), record.locals_map(), index, Slot::Reference);
    return unsafe { Reference::from_addr(slot::load_reference(addr)) };
  }

  pub fn set_local(&mut self, index: usize, value: Option<Reference>) {
    let record = self.record_ref();
    let addr = slot_addr(record.locals_base(), record.locals_map(), index, Slot::Reference);
    unsafe { slot::store_reference(addr, Reference::into_addr(value)) };
  }

  pub fn local_scalar(&self, index: usize) -> i32 {
    let record = self.record_ref();
    let addr = slot_addr(record.locals_base(), record.locals_map(), index, Slot::Scalar);
    return unsafe { slot::load_scalar(addr) };
  }

  pub fn set_local_scalar(&mut self, index: usize, value: i32) {
    let record = self.record_ref();
    let addr = slot_addr(record.locals_base(), record.locals_map(), index, Slot::Scalar);
    unsafe { slot::store_scalar(addr, value) };
  }

  pub fn argument_count(&self) -> usize {
    return self.record_ref().argument_map().map_or(0, |d| d.len());
  }

  pub fn local_count(&self) -> usize {
    return self.record_ref().locals_map().map_or(0, |d| d.len());
  }
}

impl std::fmt::Debug for Frame {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let record = self.record_ref();
    return write!(
      f,
      "Frame {{ record: {:p}, arguments: {:?}, locals: {:?}, argument_words: {} }}",
      record,
      record.argument_map(),
      record.locals_map(),
      self.arguments.len(),
    );
  }
}

fn slot_addr(base: Addr, map: Option<Descriptor>, index: usize, expected: Slot) -> Addr {
  let map = match map {
    Some(map) => map,
    None => panic!("Frame has no slots in this region"),
  };
  assert_eq!(map.slot(index), expected, "Frame slot {} is not a {:?} slot", index, expected);
  return unsafe { base.add(map.offset_of(index)) };
}
