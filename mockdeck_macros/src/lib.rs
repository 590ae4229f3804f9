mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)] derive macro
// ============================================================================

/// Derive macro for the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "kanban_cards", order_by = "created_at")]
/// struct KanbanCard {
///     #[record(id)]
///     pub id: RecordId,
///     pub title: String,
///     #[record(created_at)]
///     pub created_at: Timestamp,
/// }
/// ```
///
/// Struct-level `#[record(...)]` keys:
/// - `collection = "..."` sets the collection name. If omitted, defaults to
///   snake_case struct name + "s".
/// - `order_by = "field"` sets the natural ordering key. Ties fall back to the
///   id. If omitted, records are ordered by id (creation order).
/// - `descending` reverses the ordering key (the id tie-break stays ascending).
///
/// Field-level `#[record(...)]` markers:
/// - `id` marks the identifier field. If omitted, a field named `id` is used.
/// - `created_at` marks the field stamped with the call time on create.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
