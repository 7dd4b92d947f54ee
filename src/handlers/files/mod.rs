pub mod entry;
pub mod io;
pub mod list;
pub mod upload;

pub use io::{download_file, view_file};
pub use list::list_files;
pub use upload::upload_file;
