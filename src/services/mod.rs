//! Support services for image I/O and format conversion

mod format;
mod io;

pub use format::ImageFormatService;
pub use io::ImageIoService;
