pub(crate) mod slot;

mod descriptor;
mod frame;
mod header;
mod object;

pub use self::descriptor::{Descriptor, DescriptorTable, Slot, TypeDescriptor};
pub use self::frame::{Frame, FrameRecord, FRAME_RECORD_SIZE};
pub use self::header::{ObjectHeader, ObjectKind, HEADER_SIZE};
pub use self::object::{init_array_header, init_object_header, size_of, size_of_array, Reference};
