use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::ingredient::{parse_ingredients, Ingredient};
use crate::source::{RecipeData, RecipeSource};

/// Servings assumed when the source does not provide any.
pub const DEFAULT_SERVINGS: u32 = 4;

/// Cooking time grows by this many minutes per started group of ingredients.
const MINUTES_PER_GROUP: u32 = 15;
const INGREDIENTS_PER_GROUP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingsDirection {
    Increase,
    Decrease,
}

/// The currently selected recipe, with parsed ingredients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub url: String,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    /// Preparation time in minutes.
    pub time: u32,
    #[serde(skip)]
    ingredient_lines: Vec<String>,
}

impl Recipe {
    /// An empty recipe for `id`, to be filled by [`Recipe::get_recipe`].
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            author: String::new(),
            image: String::new(),
            url: String::new(),
            ingredients: Vec::new(),
            servings: DEFAULT_SERVINGS,
            time: 0,
            ingredient_lines: Vec::new(),
        }
    }

    /// Build a fully derived recipe from source data.
    pub fn from_data(data: RecipeData) -> Self {
        let mut recipe = Self::new(data.id.clone());
        recipe.fill(data);
        recipe.parse_ingredients();
        recipe.calc_time();
        recipe.calc_servings();
        recipe
    }

    /// Fetch this recipe's data from the source.
    pub async fn get_recipe<S: RecipeSource>(&mut self, source: &S) -> Result<(), SourceError> {
        let data = source.get_recipe(&self.id).await?;
        self.fill(data);
        Ok(())
    }

    fn fill(&mut self, data: RecipeData) {
        self.title = data.title;
        self.author = data.author;
        self.image = data.image;
        self.url = data.url;
        self.ingredient_lines = data.ingredients;
    }

    /// Turn the fetched ingredient lines into structured ingredients.
    pub fn parse_ingredients(&mut self) {
        self.ingredients = parse_ingredients(&self.ingredient_lines);
    }

    pub fn calc_time(&mut self) {
        let groups = self.ingredients.len().div_ceil(INGREDIENTS_PER_GROUP) as u32;
        self.time = groups * MINUTES_PER_GROUP;
    }

    pub fn calc_servings(&mut self) {
        self.servings = DEFAULT_SERVINGS;
    }

    /// Change servings by one and rescale every known quantity.
    /// Returns false when a decrease would drop below one serving.
    pub fn update_servings(&mut self, direction: ServingsDirection) -> bool {
        let new_servings = match direction {
            ServingsDirection::Increase => self.servings.saturating_add(1),
            ServingsDirection::Decrease if self.servings > 1 => self.servings - 1,
            ServingsDirection::Decrease => return false,
        };

        let factor = f64::from(new_servings) / f64::from(self.servings);
        for ingredient in &mut self.ingredients {
            ingredient.scale(factor);
        }
        self.servings = new_servings;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::{recipe_data, FakeRecipeSource};

    #[test]
    fn test_calc_time() {
        for (n, expected) in [(0, 0), (1, 15), (3, 15), (4, 30), (6, 30), (7, 45), (10, 60)] {
            let recipe = Recipe::from_data(recipe_data("r", &vec!["1 cup x"; n]));
            assert_eq!(recipe.time, expected, "ingredients: {}", n);
        }
    }

    #[test]
    fn test_calc_time_is_stable() {
        let mut recipe = Recipe::from_data(recipe_data("r", &["1 cup a", "2 cup b"]));
        let first = recipe.time;
        recipe.calc_time();
        assert_eq!(recipe.time, first);
    }

    #[test]
    fn test_default_servings() {
        let recipe = Recipe::from_data(recipe_data("r", &["1 cup rice"]));
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
    }

    #[test]
    fn test_update_servings_scales_counts() {
        let mut recipe = Recipe::from_data(recipe_data("r", &["2 cups rice", "salt"]));

        assert!(recipe.update_servings(ServingsDirection::Increase));
        assert_eq!(recipe.servings, 5);
        assert_eq!(recipe.ingredients[0].count, Some(2.5));
        assert_eq!(recipe.ingredients[1].count, None);
    }

    #[test]
    fn test_update_servings_round_trip() {
        let mut recipe = Recipe::from_data(recipe_data(
            "r",
            &["1/3 cup oil", "2 cups rice", "1.25 kg potatoes", "salt"],
        ));
        let original = recipe.ingredients.clone();

        recipe.update_servings(ServingsDirection::Increase);
        recipe.update_servings(ServingsDirection::Decrease);

        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        for (after, before) in recipe.ingredients.iter().zip(&original) {
            match (after.count, before.count) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                (a, b) => assert_eq!(a, b),
            }
        }
    }

    #[test]
    fn test_servings_never_below_one() {
        let mut recipe = Recipe::from_data(recipe_data("r", &["4 cups stock"]));
        for _ in 0..3 {
            assert!(recipe.update_servings(ServingsDirection::Decrease));
        }
        assert_eq!(recipe.servings, 1);
        let at_one = recipe.ingredients[0].count.unwrap();
        assert!((at_one - 1.0).abs() < 1e-9);

        assert!(!recipe.update_servings(ServingsDirection::Decrease));
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.ingredients[0].count, Some(at_one));
    }

    #[tokio::test]
    async fn test_get_recipe_fills_fields() {
        let source =
            FakeRecipeSource::new().with_recipe(recipe_data("47746", &["1 cup flour", "2 eggs"]));

        let mut recipe = Recipe::new("47746");
        recipe.get_recipe(&source).await.unwrap();
        recipe.parse_ingredients();
        recipe.calc_time();

        assert_eq!(recipe.title, "Recipe 47746");
        assert_eq!(recipe.author, "Test Kitchen");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.time, 15);
    }

    #[tokio::test]
    async fn test_get_recipe_not_found() {
        let source = FakeRecipeSource::new();
        let mut recipe = Recipe::new("missing");

        let err = recipe.get_recipe(&source).await.unwrap_err();
        assert_eq!(err, SourceError::NotFound("missing".to_string()));
    }
}
