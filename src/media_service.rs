pub mod backends;
pub mod classify;
pub mod density;
pub mod image_info;
pub mod media_info;
pub mod path_guard;
pub mod thumbnail;
pub mod utils;
pub mod video_info;

use std::{future::Future, path::PathBuf, sync::Arc, time::Duration};

use backends::{ContainerProber, FfmpegFrameExtractor, FfprobeProber, FrameExtractor};
use classify::ClassificationPolicy;

use crate::error::{ServiceError, ServiceResult};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct MediaService {
    /// Roots exactly as they were configured.
    allowed_directories: Vec<String>,
    /// Canonical form of `allowed_directories`, used for containment checks.
    permitted_roots: Vec<PathBuf>,
    policy: ClassificationPolicy,
    prober: Arc<dyn ContainerProber>,
    extractor: Arc<dyn FrameExtractor>,
    probe_timeout: Duration,
}

impl MediaService {
    pub fn try_new(allowed_directories: &[String]) -> ServiceResult<Self> {
        let permitted_roots = allowed_directories
            .iter()
            .map(|dir| path_guard::resolve_root(dir))
            .collect::<ServiceResult<Vec<_>>>()?;

        Ok(Self {
            allowed_directories: allowed_directories.to_vec(),
            permitted_roots,
            policy: ClassificationPolicy::default(),
            prober: Arc::new(FfprobeProber::default()),
            extractor: Arc::new(FfmpegFrameExtractor::default()),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        })
    }

    pub fn with_prober(mut self, prober: Arc<dyn ContainerProber>) -> Self {
        self.prober = prober;
        self
    }

    pub fn with_frame_extractor(mut self, extractor: Arc<dyn FrameExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    /// Runs an external decode/probe/extract call under the configured deadline.
    pub(crate) async fn with_deadline<T, F>(&self, operation: &str, task: F) -> ServiceResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        match tokio::time::timeout(self.probe_timeout, task).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    seconds = self.probe_timeout.as_secs(),
                    "deadline expired"
                );
                Err(ServiceError::Timeout {
                    operation: operation.to_string(),
                    seconds: self.probe_timeout.as_secs(),
                })
            }
        }
    }
}
