use crate::store::RecipeStore;
use crate::RecipeError;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub directions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeSummary {
    pub title: String,
    pub id: String,
    pub tags: Vec<String>,
}

impl RecipeSummary {
    fn new(id: String, recipe: Recipe) -> Self {
        Self {
            title: recipe.title,
            id,
            tags: recipe.tags,
        }
    }

    /// Link to the detail page.
    pub fn url(&self) -> String {
        format!("/recipe/{}", self.id)
    }
}

/// Fields as submitted by the add-recipe form.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeForm {
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub directions: Option<String>,
    pub tags: Option<String>,
}

pub fn derive_id(title: &str) -> String {
    title.to_lowercase().replace(' ', "_")
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

impl Recipe {
    /// Build the stored document and its id from a form submission.
    pub fn from_form(form: &RecipeForm) -> Result<(String, Recipe), RecipeError> {
        let title = match form.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(RecipeError::MissingTitle),
        };
        let recipe = Recipe {
            title: title.to_string(),
            ingredients: split_lines(form.ingredients.as_deref().unwrap_or_default()),
            directions: split_lines(form.directions.as_deref().unwrap_or_default()),
            tags: split_tags(form.tags.as_deref().unwrap_or_default()),
        };
        Ok((derive_id(title), recipe))
    }

    fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(query))
    }
}

pub struct Repository {
    store: Box<dyn RecipeStore>,
}

impl Repository {
    pub fn new<S: RecipeStore + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn ensure_ready(&self) -> Result<(), RecipeError> {
        self.store.ensure_ready()
    }

    pub fn list_all(&self) -> Result<Vec<RecipeSummary>, RecipeError> {
        self.summaries(|_| true)
    }

    /// Case-insensitive substring search over titles and ingredient lines.
    pub fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, RecipeError> {
        let query = query.to_lowercase();
        self.summaries(|recipe| recipe.matches(&query))
    }

    fn summaries<F>(&self, keep: F) -> Result<Vec<RecipeSummary>, RecipeError>
    where
        F: Fn(&Recipe) -> bool,
    {
        let mut summaries = Vec::new();
        for id in self.store.list_ids()? {
            let recipe = self.store.read(&id)?;
            if keep(&recipe) {
                summaries.push(RecipeSummary::new(id, recipe));
            }
        }
        Ok(summaries)
    }

    pub fn add(&self, form: &RecipeForm) -> Result<String, RecipeError> {
        let (id, recipe) = Recipe::from_form(form)?;
        if self.store.exists(&id) {
            log::info!("recipe {} exists, overwriting", id);
        }
        self.store.write(&id, &recipe)?;
        log::info!("recipe added: {}", id);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<Recipe, RecipeError> {
        self.store.read(id)
    }

    pub fn remove(&self, id: &str) -> Result<(), RecipeError> {
        self.store.delete(id)?;
        log::info!("recipe removed: {}", id);
        Ok(())
    }
}
