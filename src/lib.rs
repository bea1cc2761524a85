#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate static_assertions;
#[macro_use]
extern crate paste;

#[cfg(test)]
#[macro_use]
extern crate indoc;

#[macro_use]
mod macros;
#[macro_use]
mod debug_tools;

pub mod config;
pub mod context;
pub mod def;
pub mod error;
pub mod heap;
pub mod structs;

pub use self::config::RuntimeConfig;
pub use self::context::Runtime;
pub use self::error::{AllocationError, MapError};
pub use self::heap::GcStats;
pub use self::structs::{Descriptor, Frame, Reference, Slot, TypeDescriptor};
