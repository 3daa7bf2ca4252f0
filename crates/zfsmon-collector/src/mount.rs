use std::process::Command;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use zfsmon_common::diag::DiagnosticSink;

use crate::resource::ResourceObject;
use crate::Collector;

/// Collects the mounted ZFS filesystems by running `zfs list -H -o all`
/// and parsing each output line. In snapshot mode the listing switches
/// to `-t snapshot` and the extra trailing column that listing mode
/// emits is stripped from every record.
pub struct MountCollector {
    diag: Arc<dyn DiagnosticSink>,
    snapshots: bool,
}

impl MountCollector {
    /// Lists filesystems and volumes (the default `zfs list` set).
    pub fn new(diag: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            diag,
            snapshots: false,
        }
    }

    /// Lists snapshots instead.
    pub fn snapshots(diag: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            diag,
            snapshots: true,
        }
    }
}

impl Collector for MountCollector {
    fn name(&self) -> &str {
        if self.snapshots {
            "snapshot"
        } else {
            "mount"
        }
    }

    fn collect(&self) -> Result<Vec<ResourceObject>> {
        let mut command = Command::new("zfs");
        command.args(["list", "-H"]);
        if self.snapshots {
            command.args(["-t", "snapshot"]);
        }
        command.args(["-o", "all"]);

        let output = command.output().context("failed to run `zfs list`")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`zfs list` exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut mounts = Vec::new();
        for line in stdout.lines() {
            if line.is_empty() {
                continue;
            }
            match ResourceObject::mount(line, self.snapshots, self.diag.as_ref()) {
                Ok(mount) => mounts.push(mount),
                Err(e) => self.diag.error(&format!("skipping {} record: {e}", self.name())),
            }
        }
        Ok(mounts)
    }
}
