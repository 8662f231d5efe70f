use redb::TableDefinition;

/// Table of named slots.
/// Key: slot name (e.g. `pantry_core::LIKES_KEY`)
/// Value: JSON-encoded collection as bytes
pub const SLOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("slots");
