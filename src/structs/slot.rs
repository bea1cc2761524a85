use crate::def::*;

slot_accessors!(scalar, i32);
slot_accessors!(reference, Addr);
