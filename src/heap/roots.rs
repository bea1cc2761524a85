use crate::def::*;
use crate::structs::{FrameRecord, TypeDescriptor};
use std::marker::PhantomData;
use std::ptr;

///
/// Cursor to the top of the chain of active frame records.
///
/// Generated code links a record to the current top before entering a body
/// that may allocate and restores the previous top on return. The collector
/// only reads the chain.
///
pub struct RootStack {
  top: *mut FrameRecord,
}

impl RootStack {
  pub fn new() -> RootStack {
    return RootStack { top: ptr::null_mut() };
  }

  pub fn top(&self) -> *mut FrameRecord {
    return self.top;
  }

  ///
  /// # Safety
  /// `top` must be null or the head of a well formed, acyclic chain whose
  /// records stay valid while they are reachable from this stack.
  ///
  pub unsafe fn set_top(&mut self, top: *mut FrameRecord) {
    self.top = top;
  }

  ///
  /// # Safety
  /// `record` must stay valid and unmoved until it is popped.
  ///
  pub unsafe fn push(&mut self, record: *mut FrameRecord) {
    (*record).set_prev(self.top);
    self.top = record;
  }

  ///
  /// # Safety
  /// The stack must not be empty.
  ///
  pub unsafe fn pop(&mut self) -> *mut FrameRecord {
    debug_assert!(!self.top.is_null(), "pop on an empty root stack");
    let record = self.top;
    self.top = (*record).prev();
    return record;
  }

  pub fn is_empty(&self) -> bool {
    return self.top.is_null();
  }

  pub fn depth(&self) -> usize {
    return self.frames().count();
  }

  pub fn frames(&self) -> Frames<'_> {
    return Frames {
      current: self.top,
      _marker: PhantomData,
    };
  }
}

impl Default for RootStack {
  fn default() -> RootStack {
    return RootStack::new();
  }
}

/// Walks frame records from the top of the stack to the bottom.
pub struct Frames<'a> {
  current: *mut FrameRecord,
  _marker: PhantomData<&'a FrameRecord>,
}

impl<'a> Iterator for Frames<'a> {
  type Item = &'a FrameRecord;
  fn next(&mut self) -> Option<&'a FrameRecord> {
    if self.current.is_null() {
      return None;
    }
    let record = unsafe { &*self.current };
    self.current = record.prev();
    return Some(record);
  }
}

///
/// Hands every slot region of every active frame to `visit`, together with the
/// descriptor of that region: arguments first, then locals.
///
pub fn enumerate_roots(stack: &RootStack, mut visit: impl FnMut(Addr, &TypeDescriptor)) {
  for frame in stack.frames() {
    if let Some(map) = frame.argument_map() {
      visit(frame.argument_base(), &map);
    }
    if let Some(map) = frame.locals_map() {
      visit(frame.locals_base(), &map);
    }
  }
}
