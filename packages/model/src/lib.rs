//! Folio content-tree definitions
//!
//! This crate defines the plain data shapes edited by the admin:
//! - Navigation menu tree (`NavNode`, recursive, id-addressed)
//! - Page layout tree (`Section` → `Row` → `Column` → `Block`, index-addressed)
//! - Block payloads, one struct per block kind
//!
//! Children are held behind `Arc` so that a new tree produced by an edit can
//! reuse every subtree the edit did not touch.

pub mod block;
pub mod layout;
pub mod nav;

pub use block::*;
pub use layout::*;
pub use nav::*;
