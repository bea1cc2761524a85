#[macro_use]
extern crate criterion;

use cheney::structs::size_of;
use cheney::{Frame, Runtime, RuntimeConfig, TypeDescriptor};
use criterion::Criterion;

fn runtime() -> Runtime {
  return Runtime::new(RuntimeConfig::new(1024 * 1024).with_report_rounds(false)).unwrap();
}

fn allocate_garbage() {
  let mut rt = runtime();
  let d = rt.define(TypeDescriptor::from_gc_map(b"0110"));
  for i in 0..20000 {
    let r = rt.new_object(d, size_of(&d)).unwrap();
    r.set_scalar(0, i);
  }
}

fn allocate_live_list() {
  let mut rt = runtime();
  let cons = rt.define(TypeDescriptor::from_gc_map(b"01"));
  let garbage = rt.define(TypeDescriptor::from_gc_map(b"00000000"));
  let locals = rt.define(TypeDescriptor::from_gc_map(b"1"));
  let mut frame = Frame::new(None, Some(locals));
  rt.enter(&mut frame, |rt, frame| {
    for i in 0..2000 {
      let node = rt.new_object(cons, size_of(&cons)).unwrap();
      node.set_scalar(0, i);
      node.set_field(1, frame.local(0));
      frame.set_local(0, Some(node));
      for _ in 0..8 {
        rt.new_object(garbage, size_of(&garbage));
      }
    }
  });
}

fn bench(c: &mut Criterion) {
  c.bench_function("Allocate unreachable objects", |b| b.iter(|| allocate_garbage()));
  c.bench_function("Allocate a live list among garbage", |b| {
    b.iter(|| allocate_live_list())
  });
}

criterion_group!(benches, bench);
criterion_main!(benches);
