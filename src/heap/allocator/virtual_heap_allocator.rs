use crate::error::MapError;
use libc::c_void;
use nix::sys::mman;
use nix::sys::mman::MapFlags;
use nix::sys::mman::ProtFlags;

bitflags! {
  pub struct Prot: u8 {
    const NONE = 0x1;
    const READ = 0x2;
    const WRITE = 0x4;
  }
}
bitflags! {
  pub struct Flags: u8 {
    const NONE = 0x1;
    const ANONYMOUS = 0x2;
    const PRIVATE = 0x4;
  }
}

#[inline]
pub fn allocate(size: usize, prot: Prot, flags: Flags) -> Result<*mut c_void, MapError> {
  unsafe {
    return alloc_posix(size, prot, flags);
  }
}

#[inline]
pub fn deallocate(addr: *mut c_void, size: usize) {
  unsafe {
    dealloc_posix(addr, size);
  }
}

fn prot_flags(prot: Prot) -> ProtFlags {
  let mut prot_flags = ProtFlags::empty();
  if prot == Prot::NONE {
    prot_flags |= ProtFlags::PROT_NONE;
    return prot_flags;
  }

  if prot.contains(Prot::READ) {
    prot_flags |= ProtFlags::PROT_READ;
  }

  if prot.contains(Prot::WRITE) {
    prot_flags |= ProtFlags::PROT_WRITE;
  }

  return prot_flags;
}

fn map_flags(flags: Flags) -> MapFlags {
  let mut mmap_flags = MapFlags::empty();
  if flags == Flags::NONE {
    return mmap_flags;
  }

  if flags.contains(Flags::ANONYMOUS) {
    mmap_flags |= MapFlags::MAP_ANON;
  }

  if flags.contains(Flags::PRIVATE) {
    mmap_flags |= MapFlags::MAP_PRIVATE;
  }
  return mmap_flags;
}

unsafe fn alloc_posix(size: usize, prot: Prot, flags: Flags) -> Result<*mut c_void, MapError> {
  match mman::mmap(std::ptr::null_mut(), size, prot_flags(prot), map_flags(flags), -1, 0) {
    Ok(h) => Ok(h),
    Err(err) => Err(MapError {
      size,
      message: err.to_string(),
    }),
  }
}

unsafe fn dealloc_posix(addr: *mut c_void, size: usize) {
  if let Err(err) = mman::munmap(addr, size) {
    log::error!("munmap of {} bytes at {:p} failed: {}", size, addr, err);
  }
}
