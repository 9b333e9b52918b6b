mod loader;
mod model;
mod validation;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem};
pub use model::{Config, DEFAULT_EXTENSION, ScanConfig};
pub use validation::validate_config_semantics;
