use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipe::ServingsDirection;

/// A user action coming from the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Page load: restore likes, then show the recipe named by the hash.
    Load {
        #[serde(default)]
        hash: String,
    },
    SubmitSearch {
        query: String,
    },
    GoToPage {
        page: usize,
    },
    /// Location hash changed.
    Navigate {
        hash: String,
    },
    UpdateServings {
        direction: ServingsDirection,
    },
    AddToList,
    ToggleLike,
    DeleteItem {
        id: Uuid,
    },
    UpdateItemCount {
        id: Uuid,
        count: f64,
    },
}

/// Recipe id carried by a location hash such as `#47746`.
pub fn recipe_id_from_hash(hash: &str) -> Option<&str> {
    let id = hash.trim().trim_start_matches('#');
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
