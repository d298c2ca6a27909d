//! Loader limits.

/// 256 MiB. Far above any model the renderer can hold, low enough to fail
/// fast on a wrong path (e.g. a disk image).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 256 * 1024 * 1024;

/// Knobs for [`crate::obj::load_obj_from_path_with`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoaderConfig {
    /// Files larger than this are rejected before any content is read.
    pub max_file_bytes: u64,
}

impl LoaderConfig {
    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}
