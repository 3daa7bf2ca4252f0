//! The update-reporting protocol.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use zfsmon_collector::resource::ResourceObject;
use zfsmon_common::diag::DiagnosticSink;

/// Outcome of a single per-resource update POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The server created the resource (HTTP 201).
    Created,
    /// The server updated an existing resource (any other 2xx).
    Updated,
    /// The update was rejected or the request never completed.
    Failed,
}

/// Reports collected resource state to the zfsmon server.
///
/// One reporter is built at startup and reused for every cycle; the
/// per-resource POSTs within a cycle run strictly sequentially.
pub struct Reporter {
    client: reqwest::Client,
    server: String,
    hostname: String,
    diag: Arc<dyn DiagnosticSink>,
}

impl Reporter {
    pub fn new(
        server: &str,
        hostname: &str,
        timeout: Duration,
        diag: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            server: server.to_string(),
            hostname: hostname.to_string(),
            diag,
        })
    }

    fn host_url(&self) -> String {
        format!("{}/{}", self.server, self.hostname)
    }

    /// Checks whether this host is known to the server and registers it
    /// with descriptive metadata when it is not.
    ///
    /// Called once at process start. Registration failure is logged and
    /// not fatal: per-resource updates are idempotent, so the server
    /// rejecting a duplicate registration on a later run is harmless. A
    /// transport error on the presence probe counts as "unknown" for
    /// the same reason.
    pub async fn ensure_host_registered(&self, description: &str) {
        let known = match self.client.get(self.host_url()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                self.diag.warning(&format!(
                    "host presence check against {} failed: {e}",
                    self.server
                ));
                false
            }
        };
        if known {
            return;
        }

        let form = [
            ("hostname", self.hostname.as_str()),
            ("hostdescription", description),
        ];
        match self.client.post(self.host_url()).form(&form).send().await {
            Ok(resp) if resp.status().is_success() => {
                self.diag.info(&format!(
                    "registered new host {} on {}",
                    self.hostname, self.server
                ));
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                self.diag.error(&format!(
                    "an HTTP {status} error was encountered when creating host {} on {}; \
                     the server replied with: {body}",
                    self.hostname, self.server
                ));
            }
            Err(e) => {
                self.diag.error(&format!(
                    "failed to register host {} on {}: {e}",
                    self.hostname, self.server
                ));
            }
        }
    }

    /// POSTs the updated properties for every resource in `resources`.
    ///
    /// Returns true only if each one was accepted with a 2xx status; an
    /// empty input has nothing to fail and reports success. Individual
    /// failures are already logged by the time this returns, so callers
    /// only act on the aggregate.
    pub async fn report(&self, resources: &[ResourceObject]) -> bool {
        let mut all_updated = true;
        for resource in resources {
            if self.post_resource(resource).await == UpdateOutcome::Failed {
                all_updated = false;
            }
        }
        all_updated
    }

    /// POSTs one resource's properties to its collection endpoint and
    /// classifies the response.
    pub async fn post_resource(&self, resource: &ResourceObject) -> UpdateOutcome {
        let collection = resource.kind().collection();
        let url = format!("{}/{collection}/{}", self.host_url(), resource.name());

        let response = match self
            .client
            .post(&url)
            .form(&resource.properties().form_pairs())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                self.diag.error(&format!(
                    "failed to send {} update for {}/{}: {e}",
                    resource.kind(),
                    self.hostname,
                    resource.name()
                ));
                return UpdateOutcome::Failed;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            self.diag.error(&format!(
                "an HTTP {status} error was encountered when updating the {} {}/{} on {}; \
                 the server replied with: {body}",
                resource.kind(),
                self.hostname,
                resource.name(),
                self.server
            ));
            return UpdateOutcome::Failed;
        }

        if status == reqwest::StatusCode::CREATED {
            self.diag.info(&format!(
                "created new {} {}/{} on {}",
                resource.kind(),
                self.hostname,
                resource.name(),
                self.server
            ));
            UpdateOutcome::Created
        } else {
            self.diag.info(&format!(
                "updated {} {}/{} on {}",
                resource.kind(),
                self.hostname,
                resource.name(),
                self.server
            ));
            UpdateOutcome::Updated
        }
    }
}

/// Descriptive metadata sent with host registration: the trimmed output
/// of `uname -a`, or an empty string if the call fails.
pub fn host_description(diag: &dyn DiagnosticSink) -> String {
    match std::process::Command::new("uname").arg("-a").output() {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        Ok(output) => {
            diag.error(&format!("uname call failed: exited with {}", output.status));
            String::new()
        }
        Err(e) => {
            diag.error(&format!("uname call failed: {e}"));
            String::new()
        }
    }
}
