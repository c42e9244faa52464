pub mod apply;
pub mod catalog;
pub mod export;
pub mod files;
pub mod init;
pub mod repair;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use catalog::{blocks, catalog, new_section, NewSectionArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use repair::{repair, RepairArgs};
pub use validate::{validate, ValidateArgs};
