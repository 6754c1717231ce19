use crate::*;

use askama::Template;

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

fn render<T: Template>(template: T) -> Result<response::Response, RecipeError> {
    Ok(response::Html(template.render()?).into_response())
}

/// Run a repository call on the blocking pool; storage is plain `std::fs`.
async fn with_repo<T, F>(app_state: SharedAppState, f: F) -> Result<T, RecipeError>
where
    F: FnOnce(&Repository) -> Result<T, RecipeError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&app_state.repo)).await?
}

pub async fn home(State(app_state): State<SharedAppState>) -> Result<response::Response, RecipeError> {
    let recipes = with_repo(app_state, |repo| repo.list_all()).await?;
    log::debug!("listing {} recipes", recipes.len());
    render(IndexTemplate::new(recipes))
}

pub async fn add_recipe(
    State(app_state): State<SharedAppState>,
    Form(form): Form<RecipeForm>,
) -> Result<response::Response, RecipeError> {
    with_repo(app_state, move |repo| repo.add(&form)).await?;
    Ok(response::Redirect::to("/").into_response())
}

pub async fn view_recipe(
    State(app_state): State<SharedAppState>,
    Path(recipe_id): Path<String>,
) -> Result<response::Response, RecipeError> {
    let id = recipe_id.clone();
    let recipe = with_repo(app_state, move |repo| repo.get(&id)).await?;
    render(RecipeTemplate::new(recipe_id, recipe))
}

pub async fn delete_recipe(
    State(app_state): State<SharedAppState>,
    Path(recipe_id): Path<String>,
) -> Result<response::Response, RecipeError> {
    with_repo(app_state, move |repo| repo.remove(&recipe_id)).await?;
    Ok(response::Redirect::to("/").into_response())
}

pub async fn search(
    State(app_state): State<SharedAppState>,
    Query(params): Query<SearchParams>,
) -> Result<response::Response, RecipeError> {
    let query = params.q.unwrap_or_default().to_lowercase();
    log::info!("recipe search: {:?}", query);
    let q = query.clone();
    let results = with_repo(app_state, move |repo| repo.search(&q)).await?;
    render(SearchTemplate::new(results, query))
}
