use clap::{Parser, arg, command};

#[derive(Parser, Debug)]
#[command(name =  env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An asynchronous MCP server that describes local images and videos and extracts representative video frames, restricted to permitted directories",
long_about = None)]
pub struct CommandArguments {
    #[arg(
        short = 'p',
        long = "permitted",
        env = "MEDIA_PERMITTED_DIR",
        num_args = 1..,
        help = "Directories that media files may be read from and thumbnails written to. Can be repeated.",
        long_help = concat!("Provide one or more directories that are permitted for the operation.\nThe option can be repeated and accepts several values per occurrence.\nWhen omitted, every path is rejected.\n\nExample:  ", env!("CARGO_PKG_NAME"), " --permitted /path/to/dir1 /path/to/dir2 --permitted /path/to/dir3"),
        required = false
    )]
    pub permitted: Vec<String>,

    #[arg(
        long,
        env = "MEDIA_PROBE_TIMEOUT",
        default_value_t = 30,
        help = "Maximum number of seconds allowed for a single image decode, container probe or frame extraction."
    )]
    pub probe_timeout: u64,

    #[arg(
        long,
        env = "FFPROBE_PATH",
        default_value = "ffprobe",
        help = "Location of the ffprobe executable used to inspect media containers."
    )]
    pub ffprobe: String,

    #[arg(
        long,
        env = "FFMPEG_PATH",
        default_value = "ffmpeg",
        help = "Location of the ffmpeg executable used to extract video thumbnails."
    )]
    pub ffmpeg: String,
}

impl CommandArguments {
    pub fn validate(&self) -> Result<(), String> {
        if self.probe_timeout == 0 {
            return Err(format!(
                " `--probe-timeout` must be greater than zero.\n Run `{} --help` to view the usage instructions.",
                env!("CARGO_PKG_NAME")
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_repeated_and_multi_value_permitted() {
        let args = CommandArguments::try_parse_from([
            "rust-mcp-media",
            "--permitted",
            "/a",
            "/b",
            "-p",
            "/c",
        ])
        .unwrap();
        assert_eq!(args.permitted, vec!["/a", "/b", "/c"]);
        assert_eq!(args.probe_timeout, 30);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn permitted_dir_with_comma_is_kept_whole() {
        let args = CommandArguments::try_parse_from([
            "rust-mcp-media",
            "--permitted",
            "/media/Smith, John",
        ])
        .unwrap();
        assert_eq!(args.permitted, vec!["/media/Smith, John"]);
    }

    #[test]
    fn no_permitted_dirs_is_allowed() {
        let args = CommandArguments::try_parse_from(["rust-mcp-media"]).unwrap();
        assert!(args.permitted.is_empty());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let args =
            CommandArguments::try_parse_from(["rust-mcp-media", "--probe-timeout", "0"]).unwrap();
        assert!(args.validate().is_err());
    }
}
