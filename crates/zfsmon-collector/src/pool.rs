use std::process::Command;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use zfsmon_common::diag::DiagnosticSink;

use crate::resource::ResourceObject;
use crate::Collector;

/// Collects the active ZFS pools by running `zpool list -H -o all`
/// and parsing each output line.
pub struct PoolCollector {
    diag: Arc<dyn DiagnosticSink>,
}

impl PoolCollector {
    pub fn new(diag: Arc<dyn DiagnosticSink>) -> Self {
        Self { diag }
    }
}

impl Collector for PoolCollector {
    fn name(&self) -> &str {
        "pool"
    }

    fn collect(&self) -> Result<Vec<ResourceObject>> {
        // -H suppresses the header row and separates columns with tabs.
        let output = Command::new("zpool")
            .args(["list", "-H", "-o", "all"])
            .output()
            .context("failed to run `zpool list`")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`zpool list` exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut pools = Vec::new();
        for line in stdout.lines() {
            if line.is_empty() {
                continue;
            }
            match ResourceObject::pool(line, self.diag.as_ref()) {
                Ok(pool) => pools.push(pool),
                Err(e) => self.diag.error(&format!("skipping pool record: {e}")),
            }
        }
        Ok(pools)
    }
}
