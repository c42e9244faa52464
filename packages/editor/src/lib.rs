//! # Folio Editor
//!
//! Editing engine for the admin's two content trees: navigation menus and
//! page layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: NavNode / Section → Row → Column     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: sessions + structural operations    │
//! │  - Id repair on load                        │
//! │  - Path-addressed nav operations            │
//! │  - Per-level layout operations              │
//! │  - Validation on save                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: whole-document load / save           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: an operation returns a new root and shares every
//!    subtree it did not touch
//! 2. **Edit freely, check once**: depth and link rules are enforced by the
//!    validator at save time, never while editing
//! 3. **Whole-document persistence**: a save replaces the stored tree
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{EditorConfig, JsonFileStore, NavEditor, NavMutation, NavPatch};
//!
//! let config = EditorConfig::default();
//! let mut store = JsonFileStore::new("data");
//! let mut editor = NavEditor::load(&store, "main", &config)?;
//!
//! editor.dispatch(NavMutation::AddTopLevel)?;
//! editor.dispatch(NavMutation::Update {
//!     path: vec![],
//!     index: 0,
//!     patch: NavPatch::href("/contact"),
//! })?;
//!
//! editor.save(&mut store)?;
//! ```

pub mod catalog;
mod config;
mod errors;
pub mod ids;
pub mod layout;
mod mutations;
pub mod nav;
pub mod registry;
mod session;
mod store;
mod validator;

pub use catalog::{find_template, instantiate, section_shape, templates, SectionTemplate};
pub use config::EditorConfig;
pub use errors::EditorError;
pub use ids::{repair_ids, IdAllocator, IdGenerator, IdRepair};
pub use layout::{ColumnPatch, Sections};
pub use mutations::{LayoutMutation, MutationError, NavMutation};
pub use nav::{NavDefaults, NavPatch, NavRoot, NodeFactory};
pub use registry::{default_block, shape_check, BlockSpec, ShapeError};
pub use session::{DispatchResult, NavEditor, PageEditor};
pub use store::{check_name, write_json_atomic, JsonFileStore, MemoryStore, MenuStore, PageStore, StoreError};
pub use validator::{Location, SectionDefect, ValidationError, Validator, ValidatorConfig, DEFAULT_MAX_DEPTH};

// Re-export common types for convenience
pub use folio_common::{BlockHost, PathError};
