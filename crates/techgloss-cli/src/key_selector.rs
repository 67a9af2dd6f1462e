//! Terminal credential picker backed by a key file.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use techgloss_core::{GlossError, KeySelector, Result};
use tracing::info;

/// Stores the chosen API key in a file and asks for it on the terminal.
#[derive(Debug, Clone)]
pub struct FileKeySelector {
    path: PathBuf,
}

impl FileKeySelector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileKeySelector { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save `key`, or remove the stored key when it is blank.
    pub fn store_key(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => {
                    Err(GlossError::storage("remove key", e.to_string()))
                }
                _ => Ok(()),
            };
        }

        write_private(&self.path, key)
            .map_err(|e| GlossError::storage("write key", e.to_string()))?;
        info!(path = %self.path.display(), "Stored API key");
        Ok(())
    }

    /// Read one line from `input` and store it as the key.
    ///
    /// An empty line keeps the current key.
    pub fn select_from(&self, input: &mut impl BufRead) -> Result<bool> {
        let mut line = String::new();
        input.read_line(&mut line)?;
        if line.trim().is_empty() {
            return Ok(false);
        }
        self.store_key(&line)?;
        Ok(true)
    }
}

/// Write `contents` readable by the owner only (temp + rename, 0o600).
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let _ = fs::remove_file(&temp_path);

    let mut opts = fs::OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    drop(file);

    fs::rename(&temp_path, path)
}

/// Reads key input from the terminal.
///
/// `open_select_key` blocks on stdin. It is called from inside the
/// gateway's async explanation call, which is fine on the CLI's
/// current-thread runtime because nothing else is scheduled meanwhile.
impl KeySelector for FileKeySelector {
    fn has_selected_api_key(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    fn open_select_key(&self) -> Result<()> {
        print!("Enter a Gemini API key (empty to keep the current one): ");
        io::stdout().flush()?;

        if self.select_from(&mut io::stdin().lock())? {
            println!("API key updated.");
        } else {
            println!("API key unchanged.");
        }
        Ok(())
    }
}
