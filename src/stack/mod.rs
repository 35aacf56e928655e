//! Closed identifier sets for the JavaScript toolchain

mod id_enum_macro;
pub mod package_manager_id;

pub use package_manager_id::{CommandTemplate, PackageManagerId, LOCK_FILES};
