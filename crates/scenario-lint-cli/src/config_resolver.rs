//! Locating the configuration for a run.
//!
//! Scenario scripts usually sit a few folders below the project root
//! (`Assets/Scenarios/ch1/...`), so the project config is searched for in the
//! directory of the script, template, or folder being linted and then in each
//! of its ancestors. The search stops at the first directory holding a `.git`
//! entry. Without a project config the global one is used:
//! `$SCENARIO_LINT_CONFIG_DIR/config.toml`, else `~/.scenario-lint/config.toml`.
//! An explicit `--config` path overrides everything.

use scenario_lint_core::CONFIG_FILE_NAME;
use std::fmt;
use std::path::{Path, PathBuf};

/// Config names looked for in each directory, in order.
const PROJECT_CONFIG_NAMES: [&str; 2] = [CONFIG_FILE_NAME, ".scenario-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

const CONFIG_DIR_ENV: &str = "SCENARIO_LINT_CONFIG_DIR";

/// Directory entry marking the top of a project.
const REPOSITORY_MARKER: &str = ".git";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the linted scripts or in one of their parent folders.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Path of the config file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => write!(f, "built-in defaults"),
        }
    }
}

/// Finds the config for a lint target.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    global_dir: Option<PathBuf>,
}

impl ConfigResolver {
    /// Resolver using the global directory from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let global_dir = std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|h| h.join(".scenario-lint")));
        Self::with_global_dir(global_dir)
    }

    /// Resolver with a fixed global directory.
    #[must_use]
    pub fn with_global_dir(global_dir: Option<PathBuf>) -> Self {
        Self { global_dir }
    }

    /// Resolves the config for `target`, a script file or a directory.
    #[must_use]
    pub fn resolve(&self, target: &Path, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        if let Some(found) = find_project_config(&search_start(target)) {
            tracing::debug!("Found project config: {}", found.display());
            return ConfigSource::Project(found);
        }

        let global = self
            .global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
            .filter(|p| p.is_file());
        match global {
            Some(path) => ConfigSource::Global(path),
            None => ConfigSource::Default,
        }
    }
}

/// Absolute directory the upward search begins in.
fn search_start(target: &Path) -> PathBuf {
    let dir = if target.is_file() {
        target.parent().unwrap_or(Path::new(""))
    } else {
        target
    };
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| dir.to_path_buf(), |cwd| cwd.join(dir))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(REPOSITORY_MARKER).exists() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// `root/.git`, `root/Assets/Scenarios/ch1/intro.txt`
    fn project() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let chapter = tmp.path().join("Assets/Scenarios/ch1");
        fs::create_dir_all(&chapter).unwrap();
        let script = chapter.join("intro.txt");
        fs::write(&script, "").unwrap();
        (tmp, script)
    }

    fn resolver() -> ConfigResolver {
        ConfigResolver::with_global_dir(None)
    }

    #[test]
    fn config_in_an_ancestor_of_the_script_is_found() {
        let (tmp, script) = project();
        let config = tmp.path().join("Assets").join(CONFIG_FILE_NAME);
        fs::write(&config, "").unwrap();

        assert_eq!(resolver().resolve(&script, None), ConfigSource::Project(config.clone()));
        assert_eq!(
            resolver().resolve(script.parent().unwrap(), None),
            ConfigSource::Project(config)
        );
    }

    #[test]
    fn nearest_config_wins() {
        let (tmp, script) = project();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nearer = tmp.path().join("Assets/Scenarios/.scenario-lint.toml");
        fs::write(&nearer, "").unwrap();

        assert_eq!(resolver().resolve(&script, None), ConfigSource::Project(nearer));
    }

    #[test]
    fn search_stops_at_repository_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join(CONFIG_FILE_NAME), "").unwrap();
        let repo = outer.path().join("game");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir(repo.join("scenes")).unwrap();

        assert_eq!(resolver().resolve(&repo.join("scenes"), None), ConfigSource::Default);
    }

    #[test]
    fn global_config_is_the_fallback() {
        let (_tmp, script) = project();
        let global = TempDir::new().unwrap();
        let config = global.path().join(GLOBAL_CONFIG_NAME);
        fs::write(&config, "").unwrap();

        let resolver = ConfigResolver::with_global_dir(Some(global.path().to_path_buf()));
        let source = resolver.resolve(&script, None);
        assert_eq!(source, ConfigSource::Global(config));
        assert!(source.to_string().ends_with("(global)"));
    }

    #[test]
    fn explicit_path_is_used_unchecked() {
        let (tmp, script) = project();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();

        let source = resolver().resolve(&script, Some(Path::new("/nonexistent.toml")));
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/nonexistent.toml")));
    }

    #[test]
    fn nothing_found_means_defaults() {
        let (_tmp, script) = project();
        let source = resolver().resolve(&script, None);
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
    }
}
