//! FileSystem abstraction for testable file operations

mod mock;
pub mod probe;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{FileSystem, FileType};
pub use real::RealFileSystem;
