//! # Configuration
//!
//! The scene itself (meshes, placements, lighting) is compiled in. The few knobs that
//! depend on the machine the viewer runs on are exposed on the command line through
//! [`Args`] and resolved into a [`ViewerConfig`].

use std::path::PathBuf;

use clap::Parser;

/// Default window width in physical pixels.
pub const WINDOW_WIDTH: u32 = 800;

/// Default window height in physical pixels.
pub const WINDOW_HEIGHT: u32 = 600;

/// Title shown in the window's title bar.
pub const WINDOW_TITLE: &str = "Desk Scene";

/// Directory searched for texture images when `--assets` is not given.
pub const DEFAULT_ASSET_DIR: &str = "resources";

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "desk-scene", version, about = "Fly a camera around a small textured desk scene")]
pub struct Args {
    /// Directory containing ContainerTexture.jpg, TableTexture.jpg and PlannerTexture.jpg
    #[arg(long, default_value = DEFAULT_ASSET_DIR)]
    pub assets: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: u32,
}

/// Settings the application needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub asset_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_owned(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
        }
    }
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        Self {
            // A zero-sized surface cannot be configured.
            width: args.width.max(1),
            height: args.height.max(1),
            asset_dir: args.assets,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compiled_in_window() {
        let config = ViewerConfig::from(Args::parse_from(["desk-scene"]));
        assert_eq!(config, ViewerConfig::default());
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::parse_from([
            "desk-scene",
            "--assets",
            "textures",
            "--width",
            "1024",
            "--height",
            "0",
        ]);
        let config = ViewerConfig::from(args);
        assert_eq!(config.asset_dir, PathBuf::from("textures"));
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 1);
    }
}
