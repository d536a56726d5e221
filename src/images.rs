use std::{
    env,
    path::{Path, PathBuf},
};

use egui::ColorImage;
use log::{debug, error, info};

pub(crate) const BACKGROUND_IMAGE: &str = "background.png";
pub(crate) const BOWL_IMAGE: &str = "bowl.gif";
pub(crate) const FULLSCREEN_OPEN_IMAGE: &str = "fullscreen_open.gif";
pub(crate) const FULLSCREEN_CLOSE_IMAGE: &str = "fullscreen_close.gif";

const ASSET_DIR_ENV: &str = "FEEDTIMER_ASSETS";
const ASSET_DIR_NAME: &str = "assets";

pub(crate) struct Images {
    pub(crate) background: Option<ColorImage>,
    pub(crate) bowl: Option<ColorImage>,
    pub(crate) fullscreen_open: Option<ColorImage>,
    pub(crate) fullscreen_close: Option<ColorImage>,
}

impl Images {
    pub(crate) fn load(asset_dir: &Path) -> Self {
        info!("Loading images from {}", asset_dir.display());
        Self {
            background: load_image(&asset_dir.join(BACKGROUND_IMAGE)),
            bowl: load_image(&asset_dir.join(BOWL_IMAGE)),
            fullscreen_open: load_image(&asset_dir.join(FULLSCREEN_OPEN_IMAGE)),
            fullscreen_close: load_image(&asset_dir.join(FULLSCREEN_CLOSE_IMAGE)),
        }
    }
}

/// Decodes the first frame of `path`. A missing or unreadable file is logged
/// and leaves the region blank.
pub(crate) fn load_image(path: &Path) -> Option<ColorImage> {
    match image::open(path) {
        Ok(image) => {
            let rgba = image.to_rgba8();
            let (Ok(width), Ok(height)) =
                (usize::try_from(rgba.width()), usize::try_from(rgba.height()))
            else {
                error!("Image {} is too large", path.display());
                return None;
            };
            let size = [width, height];
            debug!("Loaded {} ({}x{})", path.display(), size[0], size[1]);
            Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
        }
        Err(err) => {
            error!("Error loading image {}: {}", path.display(), err);
            None
        }
    }
}

/// Where to read images from: the configured directory, then
/// `$FEEDTIMER_ASSETS`, then `assets/` beside the executable for packaged
/// builds, then `./assets` when run from a checkout.
pub(crate) fn asset_dir(configured: Option<&Path>) -> PathBuf {
    let env_override = env::var_os(ASSET_DIR_ENV).map(PathBuf::from);
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    resolve_asset_dir(configured, env_override, exe_dir.as_deref())
}

fn resolve_asset_dir(
    configured: Option<&Path>,
    env_override: Option<PathBuf>,
    exe_dir: Option<&Path>,
) -> PathBuf {
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_override {
        return dir;
    }
    if let Some(packaged) = exe_dir.map(|dir| dir.join(ASSET_DIR_NAME)) {
        if packaged.is_dir() {
            return packaged;
        }
    }
    PathBuf::from(ASSET_DIR_NAME)
}
