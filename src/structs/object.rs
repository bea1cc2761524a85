use super::descriptor::{Descriptor, Slot};
use super::header::{ObjectHeader, ObjectKind, HEADER_SIZE};
use super::slot;
use crate::def::*;
use std::ptr::NonNull;

/// Record size of an object of the given class.
#[inline]
pub fn size_of(descriptor: &Descriptor) -> usize {
  return descriptor.object_size();
}

/// Record size of an array. Arrays only hold scalar-width elements.
#[inline]
pub fn size_of_array(length: usize) -> usize {
  return HEADER_SIZE + length * SCALAR_SIZE;
}

/// Writes an object header at `header` and returns the payload base.
pub unsafe fn init_object_header(header: Addr, descriptor: Descriptor) -> Reference {
  ObjectHeader::object(descriptor).store(header);
  return Reference::from_header(header);
}

/// Writes an array header at `header` and returns the payload base.
pub unsafe fn init_array_header(header: Addr, length: u32) -> Reference {
  ObjectHeader::array(length).store(header);
  return Reference::from_header(header);
}

///
/// A non-null reference to a heap value: the address of its payload.
///
/// A reference is only meaningful until the next collection round; roots
/// registered through frame records are updated by the collector, copies
/// held elsewhere are not.
///
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Reference(NonNull<Byte>);

impl Reference {
  ///
  /// # Safety
  /// `addr` must be null or the payload address of a live record in the heap,
  /// and the result must not be used past the next collection unless it is
  /// stored in a root slot.
  ///
  pub unsafe fn from_addr(addr: Addr) -> Option<Reference> {
    return NonNull::new(addr).map(Reference);
  }

  pub fn into_addr(reference: Option<Reference>) -> Addr {
    return match reference {
      Some(r) => r.as_addr(),
      None => std::ptr::null_mut(),
    };
  }

  unsafe fn from_header(header: Addr) -> Reference {
    return Reference(NonNull::new_unchecked(header.add(HEADER_SIZE)));
  }

  pub fn as_addr(&self) -> Addr {
    return self.0.as_ptr();
  }

  pub fn header_addr(&self) -> Addr {
    return unsafe { self.as_addr().sub(HEADER_SIZE) };
  }

  pub fn header(&self) -> ObjectHeader {
    return unsafe { ObjectHeader::load(self.header_addr()) };
  }

  pub fn kind(&self) -> ObjectKind {
    return self.header().kind();
  }

  pub fn descriptor(&self) -> Option<Descriptor> {
    return self.header().descriptor();
  }

  pub fn length(&self) -> u32 {
    return self.header().length();
  }

  /// Size of the whole record, header included.
  pub fn size(&self) -> usize {
    return self.header().record_size();
  }

  pub fn payload(&self) -> &[u8] {
    let len = self.size() - HEADER_SIZE;
    return unsafe { std::slice::from_raw_parts(self.as_addr(), len) };
  }

  pub fn field(&self, index: usize) -> Option<Reference> {
    let addr = self.slot_addr(index, Slot::Reference);
    return unsafe { Reference::from_addr(slot::load_reference(addr)) };
  }

  pub fn set_field(&self, index: usize, value: Option<Reference>) {
    let addr = self.slot_addr(index, Slot::Reference);
    unsafe { slot::store_reference(addr, Reference::into_addr(value)) };
  }

  pub fn scalar(&self, index: usize) -> i32 {
    let addr = self.slot_addr(index, Slot::Scalar);
    return unsafe { slot::load_scalar(addr) };
  }

  pub fn set_scalar(&self, index: usize, value: i32) {
    let addr = self.slot_addr(index, Slot::Scalar);
    unsafe { slot::store_scalar(addr, value) };
  }

  pub fn element(&self, index: usize) -> i32 {
    let addr = self.element_addr(index);
    return unsafe { slot::load_scalar(addr) };
  }

  pub fn set_element(&self, index: usize, value: i32) {
    let addr = self.element_addr(index);
    unsafe { slot::store_scalar(addr, value) };
  }

  fn slot_addr(&self, index: usize, expected: Slot) -> Addr {
    let header = self.header();
    assert_eq!(header.kind(), ObjectKind::Object, "Slot access on an array");
    let descriptor = match header.descriptor() {
      Some(descriptor) => descriptor,
      None => panic!("Object without a type descriptor"),
    };
    assert_eq!(descriptor.slot(index), expected, "Slot {} is not a {:?} slot", index, expected);
    return unsafe { self.as_addr().add(descriptor.offset_of(index)) };
  }

  fn element_addr(&self, index: usize) -> Addr {
    let header = self.header();
    assert!(header.is_array(), "Element access on a scalar object");
    assert!(index < header.length() as usize, "Array index {} out of bounds", index);
    return unsafe { self.as_addr().add(index * SCALAR_SIZE) };
  }
}

impl std::fmt::Debug for Reference {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "Reference({:p})", self.0.as_ptr());
  }
}
