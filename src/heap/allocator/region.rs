use super::virtual_heap_allocator as vha;
use crate::def::*;
use crate::error::MapError;

/// An anonymous, private, read/write mapping owned for the lifetime of the value.
pub struct Region {
  start: Addr,
  size: usize,
}

impl Region {
  pub fn reserve(size: usize) -> Result<Region, MapError> {
    let start = vha::allocate(size, vha::Prot::READ | vha::Prot::WRITE, vha::Flags::ANONYMOUS | vha::Flags::PRIVATE)?;
    debug_log!("reserved {} bytes at {:p}", size, start);
    return Ok(Region {
      start: start as Addr,
      size,
    });
  }

  pub fn start(&self) -> Addr {
    return self.start;
  }

  pub fn size(&self) -> usize {
    return self.size;
  }
}

impl Drop for Region {
  fn drop(&mut self) {
    vha::deallocate(self.start as *mut libc::c_void, self.size);
  }
}

impl std::fmt::Debug for Region {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "Region {{ start: {:p}, size: {} }}", self.start, self.size);
  }
}
