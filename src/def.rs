use std::mem::size_of;

pub type Byte = u8;
pub type Addr = *mut Byte;
pub const PTR_SIZE: usize = size_of::<usize>();

/// Width of a scalar slot. Scalars are the `int` of the source language.
pub const SCALAR_SIZE: usize = size_of::<i32>();

/// Width of a reference slot.
pub const REFERENCE_SIZE: usize = size_of::<Addr>();
