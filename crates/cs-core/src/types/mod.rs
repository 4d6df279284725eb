//! Domain types for the content-split tool.
//!
//! - `identity` - Git identity and signing settings
//! - `plan` - The migration plan computed before any mutation
//!
//! All public types are re-exported at this module level and at the crate
//! root:
//!
//! ```
//! use cs_core::{GitIdentity, MigrationPlan};
//! ```

mod identity;
mod plan;

pub use identity::GitIdentity;
pub use plan::MigrationPlan;
