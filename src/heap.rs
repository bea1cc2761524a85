mod allocator;
mod copying;
mod roots;
mod semispace;
mod space;
mod stats;

pub use self::allocator::Region;
pub use self::copying::CopyingCollector;
pub use self::roots::{enumerate_roots, Frames, RootStack};
pub use self::semispace::SemiSpaceHeap;
pub use self::space::Space;
pub use self::stats::GcStats;

#[cfg(test)]
mod copying_test;
