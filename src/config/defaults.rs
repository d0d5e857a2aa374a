/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

// Storage defaults
pub const DEFAULT_FILES_PATH: &str = "./data/files";
pub const DEFAULT_PUBLIC_PATH: &str = "./data/public";
pub const DEFAULT_IMAGES_PATH: &str = "./data/public/images";
