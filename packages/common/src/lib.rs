pub mod error;
pub mod layout_path;
pub mod path;
pub mod siblings;
pub mod visitor;

pub use error::*;
pub use layout_path::*;
pub use path::*;
pub use siblings::*;
pub use visitor::*;
