//! Bucket creation orchestration
//!
//! Runs in two phases. [`plan_targets`] resolves every argument and looks up
//! its host record; any failure there aborts before a client exists.
//! [`make_buckets`] then makes one attempt per unique target, and a failure
//! only affects its own target.

use std::collections::HashSet;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::host::HostConfig;
use crate::path::{TargetUrl, resolve};
use crate::traits::ClientFactory;

/// Resolved targets keyed by URL, in first-seen order
#[derive(Debug, Default)]
pub struct TargetSet {
    entries: Vec<(TargetUrl, HostConfig)>,
    seen: HashSet<String>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target; returns false if its URL is already present
    pub fn insert(&mut self, target: TargetUrl, host: HostConfig) -> bool {
        if !self.seen.insert(target.to_string()) {
            return false;
        }
        self.entries.push((target, host));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TargetUrl, HostConfig)> {
        self.entries.iter()
    }
}

impl IntoIterator for TargetSet {
    type Item = (TargetUrl, HostConfig);
    type IntoIter = std::vec::IntoIter<(TargetUrl, HostConfig)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Resolve every argument and fetch its host record
pub fn plan_targets<S: AsRef<str>>(
    args: &[S],
    config: &Config,
    config_path: &Path,
) -> Result<TargetSet> {
    let mut targets = TargetSet::new();
    for arg in args {
        let arg = arg.as_ref();
        let target = resolve(arg, &config.aliases)?;
        let host = config.host_config(&target, config_path)?;
        if !targets.insert(target, host) {
            tracing::debug!(arg, "Skipping duplicate target");
        }
    }
    Ok(targets)
}

/// Counts reported by [`make_buckets`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MakeBucketSummary {
    pub created: usize,
    pub failed: usize,
}

/// Make one bucket per target, reporting each outcome as it happens
///
/// Targets are processed sequentially. Errors from client construction or
/// the request itself are passed to `on_outcome` and do not stop the batch.
pub async fn make_buckets<F>(
    targets: TargetSet,
    factory: &dyn ClientFactory,
    mut on_outcome: F,
) -> MakeBucketSummary
where
    F: FnMut(&TargetUrl, &Result<()>),
{
    let mut summary = MakeBucketSummary::default();
    for (target, host) in targets {
        let result = make_bucket(factory, &target, &host).await;
        match &result {
            Ok(()) => summary.created += 1,
            Err(e) => {
                tracing::warn!(%target, error = %e, "Bucket creation failed");
                summary.failed += 1;
            }
        }
        on_outcome(&target, &result);
    }
    summary
}

async fn make_bucket(
    factory: &dyn ClientFactory,
    target: &TargetUrl,
    host: &HostConfig,
) -> Result<()> {
    let client = factory.new_client(target, host).await?;
    client.make_bucket().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::{Client, MockClient, MockClientFactory};

    fn config() -> Config {
        let mut config = Config::default();
        config
            .aliases
            .insert("play".into(), "https://play.example.com:9000".into());
        config
            .hosts
            .insert("play.example.com:9000".into(), HostConfig::new("ak", "sk"));
        config
    }

    fn plan(args: &[&str]) -> Result<TargetSet> {
        plan_targets(args, &config(), Path::new("/tmp/config.toml"))
    }

    fn ok_client() -> Box<dyn Client> {
        let mut client = MockClient::new();
        client.expect_make_bucket().times(1).returning(|| Ok(()));
        Box::new(client)
    }

    fn failing_client(url: &str) -> Box<dyn Client> {
        let url = url.to_string();
        let mut client = MockClient::new();
        client.expect_make_bucket().times(1).returning(move || {
            Err(Error::Remote {
                url: url.clone(),
                source: "BucketAlreadyExists".into(),
            })
        });
        Box::new(client)
    }

    #[test]
    fn test_plan_deduplicates_alias_and_expansion() {
        let targets = plan(&[
            "play/photos",
            "https://play.example.com:9000/photos",
            "play/photos/",
        ])
        .unwrap();
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_plan_deduplicates_query_and_fragment() {
        let targets = plan(&[
            "https://play.example.com:9000/photos",
            "https://play.example.com:9000/photos?x=1",
            "https://play.example.com:9000/photos#f",
        ])
        .unwrap();
        let urls: Vec<String> = targets.iter().map(|(t, _)| t.to_string()).collect();
        assert_eq!(urls, vec!["https://play.example.com:9000/photos"]);
    }

    #[test]
    fn test_plan_keeps_input_order() {
        let targets = plan(&["play/zeta", "play/alpha", "play/zeta"]).unwrap();
        let urls: Vec<String> = targets.iter().map(|(t, _)| t.to_string()).collect();
        assert_eq!(
            urls,
            vec![
                "https://play.example.com:9000/zeta",
                "https://play.example.com:9000/alpha",
            ]
        );
    }

    #[test]
    fn test_plan_aborts_on_unsupported_scheme() {
        let err = plan(&["play/photos", "ftp://host/path"]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedScheme { .. }));
    }

    #[test]
    fn test_plan_aborts_on_missing_host() {
        let err = plan(&["https://nohost.example.org/bucket"]).unwrap_err();
        assert!(matches!(err, Error::HostConfigLookup { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_targets_make_one_call() {
        let targets = plan(&["play/photos", "https://play.example.com:9000/photos"]).unwrap();

        let mut factory = MockClientFactory::new();
        factory
            .expect_new_client()
            .times(1)
            .returning(|_, _| Ok(ok_client()));

        let summary = make_buckets(targets, &factory, |_, _| {}).await;
        assert_eq!(
            summary,
            MakeBucketSummary {
                created: 1,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_remote_failure_does_not_stop_batch() {
        let targets = plan(&["play/first", "play/second"]).unwrap();

        let mut factory = MockClientFactory::new();
        factory
            .expect_new_client()
            .times(2)
            .returning(|target, _| {
                if target.to_string().ends_with("/first") {
                    Ok(failing_client(&target.to_string()))
                } else {
                    Ok(ok_client())
                }
            });

        let mut outcomes = Vec::new();
        let summary = make_buckets(targets, &factory, |target, result| {
            outcomes.push((target.to_string(), result.is_ok()));
        })
        .await;

        assert_eq!(
            outcomes,
            vec![
                ("https://play.example.com:9000/first".to_string(), false),
                ("https://play.example.com:9000/second".to_string(), true),
            ]
        );
        assert_eq!(summary.created, 1);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_client_init_failure_is_reported() {
        let targets = plan(&["play", "play/photos"]).unwrap();

        let mut factory = MockClientFactory::new();
        factory.expect_new_client().times(2).returning(|target, _| {
            if target.as_remote().is_some_and(|u| u.path() == "/") {
                Err(Error::ClientInit {
                    url: target.to_string(),
                    reason: "bucket name is missing".into(),
                })
            } else {
                Ok(ok_client())
            }
        });

        let mut errors = Vec::new();
        make_buckets(targets, &factory, |_, result| {
            if let Err(e) = result {
                errors.push(e.to_string());
            }
        })
        .await;

        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Unable to initialize client for"));
    }
}
