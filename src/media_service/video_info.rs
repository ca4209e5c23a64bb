use std::path::Path;

use crate::{
    error::ServiceResult,
    media_service::{MediaService, backends::ProbeReport, media_info::VideoInfo},
};

impl MediaService {
    /// Probes the container at `path` and describes its streams.
    pub async fn get_video_info(&self, path: &Path) -> ServiceResult<VideoInfo> {
        let valid_path = self.check_path(path)?;
        let report = self.probe_container(&valid_path).await?;
        Ok(VideoInfo::from_probe(&valid_path, report))
    }

    pub(crate) async fn probe_container(&self, valid_path: &Path) -> ServiceResult<ProbeReport> {
        self.with_deadline("Container probing", self.prober.probe(valid_path))
            .await
    }
}
