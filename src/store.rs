use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::RecipeError;
use crate::recipe::Recipe;

const EXTENSION: &str = "json";

pub trait RecipeStore: Send + Sync {
    /// Prepare the backing storage. Called once before serving.
    fn ensure_ready(&self) -> Result<(), RecipeError>;
    fn write(&self, id: &str, recipe: &Recipe) -> Result<(), RecipeError>;
    /// Fails with [`RecipeError::NotFound`] when no document exists for `id`.
    fn read(&self, id: &str) -> Result<Recipe, RecipeError>;
    fn exists(&self, id: &str) -> bool;
    /// Removing a missing document is not an error.
    fn delete(&self, id: &str) -> Result<(), RecipeError>;
    /// Ids of all stored documents, sorted.
    fn list_ids(&self) -> Result<Vec<String>, RecipeError>;
}

/// An id names a file directly inside the storage root, nothing else.
fn is_plain_id(id: &str) -> bool {
    if id.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        if !is_plain_id(id) {
            log::warn!("rejected recipe id {:?}", id);
            return None;
        }
        Some(self.root.join(format!("{}.{}", id, EXTENSION)))
    }
}

impl RecipeStore for FsStore {
    fn ensure_ready(&self) -> Result<(), RecipeError> {
        if !self.root.exists() {
            log::info!("creating recipe directory {}", self.root.display());
            std::fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn write(&self, id: &str, recipe: &Recipe) -> Result<(), RecipeError> {
        let path = self
            .path_for(id)
            .ok_or_else(|| RecipeError::InvalidId(id.to_string()))?;
        let f = std::fs::File::create(path)?;
        serde_json::to_writer(f, recipe)?;
        Ok(())
    }

    fn read(&self, id: &str) -> Result<Recipe, RecipeError> {
        let path = self
            .path_for(id)
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;
        let f = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RecipeError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let recipe = serde_json::from_reader(std::io::BufReader::new(f))?;
        Ok(recipe)
    }

    fn exists(&self, id: &str) -> bool {
        self.path_for(id).is_some_and(|path| path.is_file())
    }

    fn delete(&self, id: &str) -> Result<(), RecipeError> {
        let Some(path) = self.path_for(id) else {
            return Ok(());
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_ids(&self) -> Result<Vec<String>, RecipeError> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
pub use mem::MemStore;

#[cfg(test)]
mod mem {
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    use super::RecipeStore;
    use crate::recipe::Recipe;
    use crate::RecipeError;

    #[derive(Default)]
    pub struct MemStore {
        recipes: Mutex<BTreeMap<String, Recipe>>,
    }

    impl MemStore {
        pub fn new() -> Self {
            Self::default()
        }

        fn recipes(&self) -> MutexGuard<'_, BTreeMap<String, Recipe>> {
            self.recipes.lock().unwrap()
        }
    }

    impl RecipeStore for MemStore {
        fn ensure_ready(&self) -> Result<(), RecipeError> {
            Ok(())
        }

        fn write(&self, id: &str, recipe: &Recipe) -> Result<(), RecipeError> {
            self.recipes().insert(id.to_string(), recipe.clone());
            Ok(())
        }

        fn read(&self, id: &str) -> Result<Recipe, RecipeError> {
            self.recipes()
                .get(id)
                .cloned()
                .ok_or_else(|| RecipeError::NotFound(id.to_string()))
        }

        fn exists(&self, id: &str) -> bool {
            self.recipes().contains_key(id)
        }

        fn delete(&self, id: &str) -> Result<(), RecipeError> {
            self.recipes().remove(id);
            Ok(())
        }

        fn list_ids(&self) -> Result<Vec<String>, RecipeError> {
            Ok(self.recipes().keys().cloned().collect())
        }
    }
}
