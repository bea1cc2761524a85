mod region;
mod virtual_heap_allocator;

pub use self::region::Region;
