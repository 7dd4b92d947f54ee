pub mod exec;
pub mod files;
