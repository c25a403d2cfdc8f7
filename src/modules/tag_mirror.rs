use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const TAGS_FILENAME: &str = "tags.txt";

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("failed to read tag mirror {}: {source}", path.display())]
    Read { path: PathBuf, #[source] source: io::Error },
    #[error("failed to write tag mirror {}: {source}", path.display())]
    Write { path: PathBuf, #[source] source: io::Error },
}

/// Flat text copy of the host selector's tags, one label per line.
#[derive(Debug, Clone)]
pub struct TagMirror { path: PathBuf }

impl TagMirror {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("brush_tag_selector");
        path.push(TAGS_FILENAME);
        path
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn write(&self, tags: &[String]) -> Result<(), MirrorError> {
        let write_err = |source: io::Error| MirrorError::Write { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut contents = String::with_capacity(tags.iter().map(|t| t.len() + 1).sum());
        for tag in tags {
            contents.push_str(tag);
            contents.push('\n');
        }
        fs::write(&self.path, contents).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), count = tags.len(), "wrote tag mirror");
        Ok(())
    }

    /// A missing file is an empty mirror, not an error.
    pub fn read(&self) -> Result<Vec<String>, MirrorError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(MirrorError::Read { path: self.path.clone(), source }),
        };
        Ok(parse_tags(&contents))
    }
}

fn parse_tags(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
