#[cfg(test)]
mod copying_test {
  use super::super::copying::CopyingCollector;
  use super::super::roots::RootStack;
  use super::super::semispace::SemiSpaceHeap;
  use crate::def::*;
  use crate::structs::*;

  struct Fixture {
    heap: SemiSpaceHeap,
    roots: RootStack,
    table: DescriptorTable,
    collector: CopyingCollector,
  }

  impl Fixture {
    fn new(heap_size: usize) -> Fixture {
      return Fixture {
        heap: SemiSpaceHeap::new(heap_size, true).unwrap(),
        roots: RootStack::new(),
        table: DescriptorTable::new(),
        collector: CopyingCollector::new(),
      };
    }

    fn alloc(&mut self, d: Descriptor) -> Reference {
      let addr = self.heap.try_allocate(size_of(&d)).unwrap();
      return unsafe { init_object_header(addr, d) };
    }

    fn alloc_array(&mut self, length: usize) -> Reference {
      let addr = self.heap.try_allocate(size_of_array(length)).unwrap();
      return unsafe { init_array_header(addr, length as u32) };
    }

    fn in_from_space(&self, r: Option<Reference>) -> bool {
      return self.heap.from_space().contains(Reference::into_addr(r));
    }
  }

  #[test]
  fn shared_reference_is_copied_once_test() {
    let mut fx = Fixture::new(1024);
    let node = fx.table.define(TypeDescriptor::from_gc_map(b"00"));
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"11"));
    let mut frame = Frame::new(None, Some(locals));
    let shared = fx.alloc(node);
    frame.set_local(0, Some(shared));
    frame.set_local(1, Some(shared));
    unsafe { fx.roots.push(frame.record()) };

    let stats = fx.collector.collect(&mut fx.heap, &fx.roots);

    assert_eq!(frame.local(0), frame.local(1));
    assert_ne!(frame.local(0), Some(shared));
    assert!(fx.in_from_space(frame.local(0)));
    assert_eq!(stats.live_bytes(), size_of(&node));
    assert_eq!(stats.reclaimed_bytes(), 0);
  }

  #[test]
  fn cycle_is_collected_and_deduplicated_test() {
    let mut fx = Fixture::new(1024);
    let node = fx.table.define(TypeDescriptor::from_gc_map(b"01"));
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"1"));
    let mut frame = Frame::new(None, Some(locals));
    let a = fx.alloc(node);
    let b = fx.alloc(node);
    a.set_scalar(0, 1);
    b.set_scalar(0, 2);
    a.set_field(1, Some(b));
    b.set_field(1, Some(a));
    frame.set_local(0, Some(a));
    unsafe { fx.roots.push(frame.record()) };

    let stats = fx.collector.collect(&mut fx.heap, &fx.roots);

    let a = frame.local(0).unwrap();
    let b = a.field(1).unwrap();
    assert_eq!(a.scalar(0), 1);
    assert_eq!(b.scalar(0), 2);
    assert_eq!(b.field(1), Some(a));
    assert_eq!(stats.live_bytes(), 2 * size_of(&node));
  }

  #[test]
  fn unreachable_objects_are_reclaimed_test() {
    let mut fx = Fixture::new(1024);
    let node = fx.table.define(TypeDescriptor::from_gc_map(b"0000"));
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"1"));
    let mut frame = Frame::new(None, Some(locals));
    let live = fx.alloc(node);
    fx.alloc(node);
    fx.alloc(node);
    frame.set_local(0, Some(live));
    unsafe { fx.roots.push(frame.record()) };

    let stats = fx.collector.collect(&mut fx.heap, &fx.roots);

    assert_eq!(stats.round(), 1);
    assert_eq!(stats.live_bytes(), size_of(&node));
    assert_eq!(stats.reclaimed_bytes(), 2 * size_of(&node));
    assert_eq!(fx.heap.used(), size_of(&node));
  }

  #[test]
  fn copies_are_laid_out_breadth_first_test() {
    let mut fx = Fixture::new(2048);
    let pair = fx.table.define(TypeDescriptor::from_gc_map(b"011"));
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"1"));
    let mut frame = Frame::new(None, Some(locals));
    // a -> (b, c), b -> (d, -)
    let d = fx.alloc(pair);
    let c = fx.alloc(pair);
    let b = fx.alloc(pair);
    let a = fx.alloc(pair);
    for (r, tag) in [(a, 1), (b, 2), (c, 3), (d, 4)] {
      r.set_scalar(0, tag);
    }
    a.set_field(1, Some(b));
    a.set_field(2, Some(c));
    b.set_field(1, Some(d));
    frame.set_local(0, Some(a));
    unsafe { fx.roots.push(frame.record()) };

    fx.collector.collect(&mut fx.heap, &fx.roots);

    let start = fx.heap.from_space().start();
    let size = size_of(&pair);
    for (index, tag) in [1, 2, 3, 4].iter().enumerate() {
      let r = unsafe { Reference::from_addr(start.add(index * size + HEADER_SIZE)) }.unwrap();
      assert_eq!(r.scalar(0), *tag);
    }
    let a = frame.local(0).unwrap();
    assert_eq!(a.header_addr(), start);
    assert_eq!(a.field(1).unwrap().field(2), None);
  }

  #[test]
  fn payload_is_bit_identical_test() {
    let mut fx = Fixture::new(1024);
    let node = fx.table.define(TypeDescriptor::from_gc_map(b"0000"));
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"1"));
    let mut frame = Frame::new(None, Some(locals));
    let r = fx.alloc(node);
    for i in 0..4 {
      r.set_scalar(i, (0x01020304 * (i as i32 + 1)) ^ -1);
    }
    let before = r.payload().to_vec();
    frame.set_local(0, Some(r));
    unsafe { fx.roots.push(frame.record()) };

    fx.collector.collect(&mut fx.heap, &fx.roots);

    let after = frame.local(0).unwrap();
    assert_eq!(after.payload(), &before[..]);
    assert_eq!(after.descriptor(), Some(node));
    assert!(after.header().forwarding().is_null());
  }

  #[test]
  fn no_reference_points_into_the_old_space_test() {
    let mut fx = Fixture::new(4096);
    let node = fx.table.define(TypeDescriptor::from_gc_map(b"101"));
    let arguments = fx.table.define(TypeDescriptor::from_gc_map(b"01"));
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"11"));
    let mut outer = Frame::new(Some(arguments), Some(locals));
    let mut inner = Frame::new(None, Some(locals));
    let mut chain = vec![];
    for _ in 0..8 {
      let r = fx.alloc(node);
      if let Some(prev) = chain.last() {
        r.set_field(0, Some(*prev));
      }
      chain.push(r);
    }
    outer.set_argument_scalar(0, 9);
    outer.set_argument(1, Some(chain[7]));
    outer.set_local(0, Some(chain[3]));
    inner.set_local(1, Some(chain[5]));
    unsafe {
      fx.roots.push(outer.record());
      fx.roots.push(inner.record());
    }
    let old_space = fx.heap.from_space();

    fx.collector.collect(&mut fx.heap, &fx.roots);

    assert!(!fx.heap.is_collecting());
    assert_eq!(outer.argument_scalar(0), 9);
    assert_eq!(outer.local(1), None);
    assert_eq!(inner.local(0), None);
    let mut live = vec![outer.argument(1), outer.local(0), inner.local(1)];
    let mut seen = 0;
    while let Some(r) = live.pop() {
      let r = match r {
        Some(r) => r,
        None => continue,
      };
      assert!(!old_space.contains(r.as_addr()));
      assert!(fx.in_from_space(Some(r)));
      seen += 1;
      live.push(r.field(0));
      live.push(r.field(2));
    }
    assert!(seen >= 8);
    assert_eq!(fx.heap.used(), 8 * size_of(&node));
  }

  #[test]
  fn arrays_are_scanned_as_leaves_test() {
    let mut fx = Fixture::new(1024);
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"1"));
    let mut frame = Frame::new(None, Some(locals));
    let array = fx.alloc_array(10);
    for i in 0..10 {
      array.set_element(i, 100 + i as i32);
    }
    frame.set_local(0, Some(array));
    unsafe { fx.roots.push(frame.record()) };

    let stats = fx.collector.collect(&mut fx.heap, &fx.roots);

    let array = frame.local(0).unwrap();
    assert_eq!(array.kind(), ObjectKind::Array);
    assert_eq!(array.length(), 10);
    for i in 0..10 {
      assert_eq!(array.element(i), 100 + i as i32);
    }
    assert_eq!(stats.live_bytes(), size_of_array(10));
  }

  #[test]
  fn survives_repeated_rounds_test() {
    let mut fx = Fixture::new(1024);
    let node = fx.table.define(TypeDescriptor::from_gc_map(b"01"));
    let locals = fx.table.define(TypeDescriptor::from_gc_map(b"1"));
    let mut frame = Frame::new(None, Some(locals));
    let a = fx.alloc(node);
    let b = fx.alloc(node);
    a.set_field(1, Some(b));
    b.set_scalar(0, 77);
    frame.set_local(0, Some(a));
    unsafe { fx.roots.push(frame.record()) };

    for round in 1..=3 {
      let stats = fx.collector.collect(&mut fx.heap, &fx.roots);
      assert_eq!(stats.round(), round);
      assert_eq!(stats.live_bytes(), 2 * size_of(&node));
      let a = frame.local(0).unwrap();
      assert!(fx.in_from_space(Some(a)));
      assert_eq!(a.field(1).unwrap().scalar(0), 77);
    }
    assert_eq!(fx.collector.rounds(), 3);
  }

  #[test]
  fn empty_root_stack_reclaims_everything_test() {
    let mut fx = Fixture::new(1024);
    let node = fx.table.define(TypeDescriptor::from_gc_map(b"1"));
    fx.alloc(node);
    let stats = fx.collector.collect(&mut fx.heap, &fx.roots);
    assert_eq!(stats.live_bytes(), 0);
    assert_eq!(stats.reclaimed_bytes(), size_of(&node));
    assert_eq!(fx.heap.used(), 0);
  }
}
