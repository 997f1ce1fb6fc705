use std::path::PathBuf;

use crate::env_or;

/// Avatar upload configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarConfig {
    /// Directory where original images are written as `{student_id}.{ext}`
    pub dir: PathBuf,
    /// Largest accepted upload in bytes
    pub max_bytes: usize,
    /// Width of generated previews in pixels
    pub preview_width: u32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("avatars"),
            max_bytes: 300 * 1024,
            preview_width: 100,
        }
    }
}

impl AvatarConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dir: std::env::var("AVATARS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
            max_bytes: env_or("AVATAR_MAX_BYTES", defaults.max_bytes),
            preview_width: env_or("AVATAR_PREVIEW_WIDTH", defaults.preview_width).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cap_is_300_kib() {
        assert_eq!(AvatarConfig::default().max_bytes, 307_200);
        assert_eq!(AvatarConfig::default().preview_width, 100);
    }
}
