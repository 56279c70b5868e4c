//! treedit: copy-on-write editing of a forest of named nodes.
//!
//! The [`domain`] layer is the engine: id allocation, lookup, structural
//! edits and selection tracking, all pure over immutable, shared subtrees.
//! [`application::EditorSession`] owns the mutable state around it and
//! [`cli`] is a terminal front end.
//!
//! ```
//! use treedit::application::EditorSession;
//! use treedit::domain::NodeId;
//!
//! let mut session = EditorSession::default();
//! session.select(NodeId::new(2).unwrap()).unwrap();
//! let id = session.add("X").unwrap();
//! assert_eq!(id.get(), 6);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
