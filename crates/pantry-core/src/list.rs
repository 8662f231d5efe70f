use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One quantified ingredient on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// Insertion-ordered shopping list keyed by generated ids.
/// The same ingredient may appear more than once.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item with a fresh id and return a copy of it.
    pub fn add_item(&mut self, count: Option<f64>, unit: &str, ingredient: &str) -> ShoppingItem {
        let item = ShoppingItem {
            id: Uuid::new_v4(),
            count: count.map(round_count),
            unit: unit.to_string(),
            ingredient: ingredient.to_string(),
        };
        self.items.push(item.clone());
        item
    }

    /// Remove an item. Returns false if no item has this id.
    pub fn delete_item(&mut self, id: Uuid) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace an item's count. Returns false if no item has this id.
    pub fn update_count(&mut self, id: Uuid, count: f64) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.count = Some(round_count(count));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Round to 3 decimal places.
fn round_count(count: f64) -> f64 {
    (count * 1000.0).round() / 1000.0
}
