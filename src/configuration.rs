//! User-configurable behavior: the options bitset, named patches, the configuration-mode action table, and
//! the persisted record that survives power cycles.

mod actions;
pub use actions::*;

mod options;
pub use options::*;

mod patch;
pub use patch::*;

mod persist;
pub use persist::*;
