use crate::error::{CoreError, SourceError};
use crate::source::{RecipeSource, RecipeSummary};

/// One search: a query and the summaries it returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

impl Search {
    /// Start a search. Empty and whitespace-only queries are rejected.
    pub fn new(query: &str) -> Result<Self, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::EmptyQuery);
        }
        Ok(Self {
            query: query.to_string(),
            results: Vec::new(),
        })
    }

    /// Fetch results for the query, replacing any previous results.
    pub async fn get_results<S: RecipeSource>(&mut self, source: &S) -> Result<(), SourceError> {
        self.results = source.search(&self.query).await?;
        Ok(())
    }
}
