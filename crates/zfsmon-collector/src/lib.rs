//! Storage state collection for the zfsmon agent.
//!
//! Each [`Collector`] implementation invokes one of the ZFS listing
//! tools (`zpool list`, `zfs list`), parses the tab-separated no-header
//! output positionally against a field schema, and returns the result
//! as [`resource::ResourceObject`]s ready to report.

pub mod mount;
pub mod pool;
pub mod record;
pub mod resource;
pub mod schema;


use anyhow::Result;

use crate::resource::ResourceObject;

/// A storage resource collector that runs on the agent host.
///
/// Implementations are registered in the agent's update loop and called
/// once per cycle. A failure to run the underlying listing command is
/// returned as an error; the caller treats it as zero resources of that
/// kind for the cycle.
pub trait Collector: Send + Sync {
    /// Returns the resource name this collector produces (e.g.,
    /// `"pool"`), used for logging.
    fn name(&self) -> &str;

    /// Collects the current resource state.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing command could not be run or
    /// exited nonzero.
    fn collect(&self) -> Result<Vec<ResourceObject>>;
}
