mod generate_images_from_videos;
mod get_allowed_directories;
mod get_images_info;
mod get_media_info;
mod get_videos_info;
pub mod tool_result;

pub use generate_images_from_videos::{
    GenerateImagesFromVideos, ThumbnailRecord, ThumbnailSubject, VideoImagePair,
};
pub use get_allowed_directories::GetAllowedDirectories;
pub use get_images_info::GetImagesInfo;
pub use get_media_info::{GetMediaInfo, MediaSubject, UNKNOWN_MEDIA_TYPE};
pub use get_videos_info::GetVideosInfo;
pub use rust_mcp_sdk::tool_box;
pub use tool_result::{PathSubject, ToolResultItem};

//Generate MediaTools enum , tools() function, and TryFrom<CallToolRequestParams> trait implementation
tool_box!(
    MediaTools,
    [
        GetMediaInfo,
        GetImagesInfo,
        GetVideosInfo,
        GenerateImagesFromVideos,
        GetAllowedDirectories
    ]
);
