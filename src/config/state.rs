// Application state module
// Immutable per-process state, built once at startup and shared by Arc

use std::io;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state shared with every request handler.
///
/// Nothing in here is mutated after startup; handlers only ever read it.
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root; every resolved file must stay under it
    pub root: PathBuf,
}

impl AppState {
    /// Build state from the loaded configuration.
    ///
    /// Fails if the configured root does not exist or cannot be
    /// canonicalized, which would make traversal checks meaningless.
    pub fn new(config: &Config) -> io::Result<Self> {
        let root = Path::new(&config.server.root).canonicalize()?;
        Ok(Self {
            config: config.clone(),
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn root_is_canonicalized() {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should load");
        cfg.server.root = ".".to_string();
        let state = AppState::new(&cfg).expect("cwd should canonicalize");
        assert!(state.root.is_absolute());
    }

    #[test]
    fn missing_root_is_rejected() {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should load");
        cfg.server.root = "/definitely/not/a/real/devserve/root".to_string();
        assert!(AppState::new(&cfg).is_err());
    }
}
