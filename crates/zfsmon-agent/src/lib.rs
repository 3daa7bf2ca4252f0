//! The zfsmon agent: collects ZFS pool and mount state on a fixed
//! interval and reports it to a zfsmon aggregation server over HTTP.

pub mod config;
pub mod reporter;
