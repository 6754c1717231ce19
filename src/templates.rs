use crate::*;

use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    recipes: Vec<RecipeSummary>,
    stylesheet: &'static str,
}

impl IndexTemplate {
    pub fn new(recipes: Vec<RecipeSummary>) -> Self {
        Self {
            recipes,
            stylesheet: "/style.css",
        }
    }
}

#[derive(Template)]
#[template(path = "recipe.html")]
pub struct RecipeTemplate {
    id: String,
    recipe: Recipe,
    stylesheet: &'static str,
}

impl RecipeTemplate {
    pub fn new(id: String, recipe: Recipe) -> Self {
        Self {
            id,
            recipe,
            stylesheet: "/style.css",
        }
    }
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    results: Vec<RecipeSummary>,
    query: String,
    stylesheet: &'static str,
}

impl SearchTemplate {
    pub fn new(results: Vec<RecipeSummary>, query: String) -> Self {
        Self {
            results,
            query,
            stylesheet: "/style.css",
        }
    }
}
