pub mod scopes;
pub mod settings;

pub use scopes::{get_scopes, ScopeConfig, TopperScope};
pub use settings::{AppConfig, GradingSettings, StorageSettings};
