use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use uuid::Uuid;

use crate::ingredient::Ingredient;
use crate::likes::Like;
use crate::list::ShoppingItem;
use crate::recipe::Recipe;
use crate::source::RecipeSummary;

/// Results shown per page unless configured otherwise.
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;

/// Where a loading spinner goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderTarget {
    SearchResults,
    Recipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageButtonKind {
    Prev,
    Next,
}

/// A pagination button and the page it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub kind: PageButtonKind,
    pub goto: usize,
}

/// One render instruction for the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewUpdate {
    ClearInput,
    ClearResults,
    RenderLoader {
        target: LoaderTarget,
    },
    ClearLoader,
    RenderResults {
        recipes: Vec<RecipeSummary>,
        page: usize,
        pages: usize,
        buttons: Vec<PageButton>,
    },
    HighlightSelected {
        id: String,
    },
    ClearRecipe,
    RenderRecipe {
        recipe: Recipe,
        liked: bool,
    },
    UpdateServingsIngredients {
        servings: u32,
        ingredients: Vec<Ingredient>,
    },
    ClearItems,
    RenderItem {
        item: ShoppingItem,
    },
    DeleteItem {
        id: Uuid,
    },
    ToggleLikeBtn {
        liked: bool,
    },
    RenderLike {
        like: Like,
    },
    DeleteLike {
        id: String,
    },
    ToggleLikeMenu {
        visible: bool,
    },
    Alert {
        message: String,
    },
}

/// Receiver of render instructions.
pub trait View: Send + Sync {
    fn render(&self, update: ViewUpdate);
}

/// View that keeps every update in order, for handing back to a client.
#[derive(Debug, Default)]
pub struct RecordingView {
    updates: Mutex<Vec<ViewUpdate>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded updates.
    pub fn take(&self) -> Vec<ViewUpdate> {
        std::mem::take(&mut *self.updates.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl View for RecordingView {
    fn render(&self, update: ViewUpdate) {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(update);
    }
}

/// Number of pages needed for `total` results.
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Buttons for `page` out of `pages`: next only on the first page, prev only on
/// the last, both in between, none for a single page. Out-of-range pages clamp.
pub fn page_buttons(page: usize, pages: usize) -> Vec<PageButton> {
    if pages <= 1 {
        return Vec::new();
    }
    let page = page.clamp(1, pages);
    let prev = PageButton {
        kind: PageButtonKind::Prev,
        goto: page - 1,
    };
    let next = PageButton {
        kind: PageButtonKind::Next,
        goto: page + 1,
    };
    if page == 1 {
        vec![next]
    } else if page < pages {
        vec![prev, next]
    } else {
        vec![prev]
    }
}

/// One page of results. Out-of-range pages clamp to the first or last page.
pub fn render_results(results: &[RecipeSummary], page: usize, per_page: usize) -> ViewUpdate {
    let per_page = per_page.max(1);
    let pages = page_count(results.len(), per_page);
    let page = page.clamp(1, pages.max(1));
    let start = (page - 1) * per_page;
    let recipes = results.iter().skip(start).take(per_page).cloned().collect();

    ViewUpdate::RenderResults {
        recipes,
        page,
        pages,
        buttons: page_buttons(page, pages),
    }
}

pub fn render_like_menu(num_likes: usize) -> ViewUpdate {
    ViewUpdate::ToggleLikeMenu {
        visible: num_likes > 0,
    }
}

pub fn render_servings(recipe: &Recipe) -> ViewUpdate {
    ViewUpdate::UpdateServingsIngredients {
        servings: recipe.servings,
        ingredients: recipe.ingredients.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::summaries;

    fn unpack(update: ViewUpdate) -> (Vec<RecipeSummary>, usize, usize, Vec<PageButton>) {
        match update {
            ViewUpdate::RenderResults {
                recipes,
                page,
                pages,
                buttons,
            } => (recipes, page, pages, buttons),
            other => panic!("unexpected update: {:?}", other),
        }
    }

    #[test]
    fn test_page_buttons() {
        use PageButtonKind::{Next, Prev};
        let kinds = |page, pages| -> Vec<(PageButtonKind, usize)> {
            page_buttons(page, pages)
                .into_iter()
                .map(|b| (b.kind, b.goto))
                .collect()
        };

        assert!(kinds(1, 1).is_empty());
        assert!(kinds(1, 0).is_empty());
        assert_eq!(kinds(1, 3), vec![(Next, 2)]);
        assert_eq!(kinds(2, 3), vec![(Prev, 1), (Next, 3)]);
        assert_eq!(kinds(3, 3), vec![(Prev, 2)]);
    }

    #[test]
    fn test_page_buttons_out_of_range() {
        let first = page_buttons(0, 3);
        assert_eq!(first, page_buttons(1, 3));
        assert_eq!(first[0].goto, 2);

        assert_eq!(page_buttons(9, 3), page_buttons(3, 3));
    }

    #[test]
    fn test_render_results_slices_pages() {
        let results = summaries("pizza", 25);

        let (recipes, page, pages, _) = unpack(render_results(&results, 1, 10));
        assert_eq!((page, pages, recipes.len()), (1, 3, 10));
        assert_eq!(recipes[0].id, "pizza-0");

        let (recipes, page, _, _) = unpack(render_results(&results, 3, 10));
        assert_eq!((page, recipes.len()), (3, 5));
        assert_eq!(recipes[0].id, "pizza-20");
    }

    #[test]
    fn test_render_results_clamps_page() {
        let results = summaries("pizza", 12);

        let (_, page, _, _) = unpack(render_results(&results, 9, 10));
        assert_eq!(page, 2);

        let (_, page, _, _) = unpack(render_results(&results, 0, 10));
        assert_eq!(page, 1);
    }

    #[test]
    fn test_render_results_empty() {
        let (recipes, page, pages, buttons) = unpack(render_results(&[], 1, 10));
        assert!(recipes.is_empty());
        assert_eq!((page, pages), (1, 0));
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_like_menu_visibility() {
        assert_eq!(render_like_menu(0), ViewUpdate::ToggleLikeMenu { visible: false });
        assert_eq!(render_like_menu(2), ViewUpdate::ToggleLikeMenu { visible: true });
    }

    #[test]
    fn test_update_serialization() {
        let json = serde_json::to_value(ViewUpdate::ToggleLikeBtn { liked: true }).unwrap();
        assert_eq!(json["type"], "toggle_like_btn");
        assert_eq!(json["liked"], true);

        let json = serde_json::to_value(ViewUpdate::ClearLoader).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "clear_loader" }));
    }

    #[test]
    fn test_recording_view_drains() {
        let view = RecordingView::new();
        view.render(ViewUpdate::ClearInput);
        view.render(ViewUpdate::ClearResults);

        assert_eq!(
            view.take(),
            vec![ViewUpdate::ClearInput, ViewUpdate::ClearResults]
        );
        assert!(view.take().is_empty());
    }
}
