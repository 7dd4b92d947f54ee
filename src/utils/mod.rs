pub mod common;
pub mod disks;
pub mod path;
