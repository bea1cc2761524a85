macro_rules! kb {
  ($n:expr) => {
    ($n) * 1024
  };
}

macro_rules! mb {
  ($n:expr) => {
    kb!($n) * 1024
  };
}

// Generates unaligned load/store pairs for one slot width.
// Objects are packed without padding, so slots can sit on any byte boundary.
macro_rules! slot_accessors {
  ($name:ident, $type:ty) => {
    paste! {
      #[inline]
      pub unsafe fn [<load_ $name>](slot: Addr) -> $type {
        return std::ptr::read_unaligned(slot as *const $type);
      }

      #[inline]
      pub unsafe fn [<store_ $name>](slot: Addr, value: $type) {
        std::ptr::write_unaligned(slot as *mut $type, value);
      }
    }
  };
}
