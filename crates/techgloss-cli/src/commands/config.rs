//! Config command - locate or write the configuration file.

use crate::ConfigAction;
use std::path::{Path, PathBuf};
use techgloss_core::Config;

/// Run the config command.
///
/// `path` is the `--config` override; the default location is used when
/// it is absent.
pub fn run(config: Config, path: Option<PathBuf>, action: ConfigAction) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => {
            init(&config, &path, force)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

/// Write `config` to `path`, refusing to replace an existing file unless
/// `force` is set.
fn init(config: &Config, path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config.save_to(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("techgloss.toml");

        let mut config = Config::default();
        config.ui.page_size = 20;
        init(&config, &path, false).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ui.page_size, 20);
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("techgloss.toml");
        std::fs::write(&path, "[ui]\npage_size = 7\n").unwrap();

        assert!(init(&Config::default(), &path, false).is_err());
        assert_eq!(Config::load_from(&path).unwrap().ui.page_size, 7);

        init(&Config::default(), &path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().ui.page_size, 50);
    }
}
