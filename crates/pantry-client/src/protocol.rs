use serde::{Deserialize, Deserializer};

use pantry_core::{RecipeData, RecipeSummary};

/// Response of `GET {base}/search?q=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub recipes: Vec<WireSummary>,
}

/// A search hit as the API sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub recipe_id: String,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub image_url: String,
}

impl From<WireSummary> for RecipeSummary {
    fn from(w: WireSummary) -> Self {
        Self {
            id: w.recipe_id,
            title: w.title,
            author: w.publisher,
            image: w.image_url,
        }
    }
}

/// Response of `GET {base}/get?rId=...`. The API reports unknown ids with an
/// `error` field instead of a recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeResponse {
    #[serde(default)]
    pub recipe: Option<WireRecipe>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRecipe {
    #[serde(deserialize_with = "string_or_number")]
    pub recipe_id: String,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl From<WireRecipe> for RecipeData {
    fn from(w: WireRecipe) -> Self {
        Self {
            id: w.recipe_id,
            title: w.title,
            author: w.publisher,
            image: w.image_url,
            url: w.source_url,
            ingredients: w.ingredients,
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "count": 2,
            "recipes": [
                {"publisher": "Closet Cooking", "title": "Pizza Dip", "source_url": "http://x",
                 "recipe_id": "35477", "image_url": "http://img/35477.jpg", "social_rank": 99.9},
                {"publisher": "All Recipes", "title": "Pizza Pinwheels", "recipe_id": 12345,
                 "image_url": "http://img/12345.jpg"}
            ]
        }"#;

        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        let summaries: Vec<RecipeSummary> = resp.recipes.into_iter().map(Into::into).collect();

        assert_eq!(resp.count, 2);
        assert_eq!(summaries[0].id, "35477");
        assert_eq!(summaries[0].author, "Closet Cooking");
        assert_eq!(summaries[1].id, "12345");
        assert_eq!(summaries[1].title, "Pizza Pinwheels");
    }

    #[test]
    fn test_decode_recipe_response() {
        let body = r#"{"recipe": {
            "publisher": "101 Cookbooks", "title": "Best Pizza Dough Ever",
            "source_url": "http://www.101cookbooks.com/archives/001199.html",
            "recipe_id": "47746", "image_url": "http://img/47746.jpg",
            "ingredients": ["4 1/2 cups (20.25 ounces) unbleached high-gluten flour", "1 3/4 teaspoons salt"]
        }}"#;

        let resp: RecipeResponse = serde_json::from_str(body).unwrap();
        let data: RecipeData = resp.recipe.unwrap().into();

        assert_eq!(data.id, "47746");
        assert_eq!(data.author, "101 Cookbooks");
        assert_eq!(data.url, "http://www.101cookbooks.com/archives/001199.html");
        assert_eq!(data.ingredients.len(), 2);
    }

    #[test]
    fn test_decode_error_response() {
        let resp: RecipeResponse =
            serde_json::from_str(r#"{"error": "Couldn't find recipe with that ID"}"#).unwrap();
        assert!(resp.recipe.is_none());
        assert!(resp.error.is_some());
    }
}
