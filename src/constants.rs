//! Global constants for the palette tuner

/// Application name, used in logs and the config file
pub const APP_NAME: &str = "Palette Tuner";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "palette-tuner";

/// Config file name for auto-load/save
pub const CONFIG_FILE_NAME: &str = "palette-tuner-config.json";

/// LocalStorage key for the web build
pub const LOCALSTORAGE_KEY: &str = "palette-tuner-config";

/// Title shown by the terminal demo when none is given
pub const DEMO_TITLE: &str = "palette tuner";
