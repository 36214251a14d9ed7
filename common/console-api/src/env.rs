use std::path::PathBuf;

/// Overrides the console's dotdir.  The integration tests point this at a temporary directory.
pub const DOTDIR_VAR: &str = "ENGINE_CONSOLE_DIR";

pub fn dotdir_override() -> Option<PathBuf> {
    std::env::var_os(DOTDIR_VAR)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}
