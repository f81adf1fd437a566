use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Where raw config text lives. `Ok(None)` means nothing has been written
/// yet, which callers treat as "use defaults".
pub trait ConfigSource {
    fn read(&self) -> Result<Option<String>, String>;
    fn write(&self, content: &str) -> Result<(), String>;
}

pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn read(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read config file {}: {}", self.path.display(), err)),
        }
    }

    fn write(&self, content: &str) -> Result<(), String> {
        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write config file {}: {}", self.path.display(), e))
    }
}

#[derive(Default)]
pub struct InMemoryConfigSource {
    content: Mutex<Option<String>>,
}

impl InMemoryConfigSource {
    pub fn new(content: Option<String>) -> Self {
        Self { content: Mutex::new(content) }
    }
}

impl ConfigSource for InMemoryConfigSource {
    fn read(&self) -> Result<Option<String>, String> {
        let content = self.content.lock().map_err(|_| "Config source lock poisoned".to_string())?;
        Ok(content.clone())
    }

    fn write(&self, content: &str) -> Result<(), String> {
        let mut current = self.content.lock().map_err(|_| "Config source lock poisoned".to_string())?;
        *current = Some(content.to_string());
        Ok(())
    }
}
