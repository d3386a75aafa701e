//! Favorites Store
//!
//! A small persistent set of city names backed by localStorage under the
//! `favorites` key, stored as a JSON string array. Malformed or absent
//! content loads as the empty list. The list keeps insertion order and
//! rejects exact duplicates (case-sensitive).
//!
//! The JSON/list logic is pure so it unit-tests natively; only
//! [`read_raw`]/[`write_raw`] touch the browser.

use crate::state::global::GlobalState;

/// localStorage key holding the JSON-encoded list
pub const STORAGE_KEY: &str = "favorites";

// ============ Pure core ============

/// Decode persisted content; anything unexpected becomes the empty list
pub fn parse_stored(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str::<Vec<String>>(&s).ok())
        .unwrap_or_default()
}

/// Append `city` unless an exact match is already present.
/// Returns whether the list changed.
pub fn push_unique(list: &mut Vec<String>, city: &str) -> bool {
    if list.iter().any(|c| c == city) {
        return false;
    }
    list.push(city.to_string());
    true
}

/// Remove every exact match of `city`
pub fn remove_all(list: &mut Vec<String>, city: &str) {
    list.retain(|c| c != city);
}

// ============ Browser storage glue ============

#[cfg(target_arch = "wasm32")]
fn read_raw() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(STORAGE_KEY).ok()?
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn write_raw(json: &str) {
    if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
        let _ = storage.set_item(STORAGE_KEY, json);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(_json: &str) {}

/// Load the persisted list (empty on absence or malformed content)
pub fn load() -> Vec<String> {
    parse_stored(read_raw())
}

/// Overwrite the persisted list
pub fn save(list: &[String]) {
    if let Ok(json) = serde_json::to_string(list) {
        write_raw(&json);
    }
}

// ============ Reactive operations ============

/// Add a city: no-op if already present; persists and updates the signal
pub fn add(state: &GlobalState, city: &str) {
    let mut list = state.favorites.get_untracked();
    if push_unique(&mut list, city) {
        save(&list);
        state.favorites.set(list);
    }
}

/// Remove all exact matches of a city; persists and updates the signal
pub fn remove(state: &GlobalState, city: &str) {
    let mut list = state.favorites.get_untracked();
    remove_all(&mut list, city);
    save(&list);
    state.favorites.set(list);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_storage_is_empty_list() {
        assert!(parse_stored(None).is_empty());
    }

    #[test]
    fn malformed_storage_is_empty_list() {
        assert!(parse_stored(Some("not json".to_string())).is_empty());
        assert!(parse_stored(Some("{\"a\":1}".to_string())).is_empty());
    }

    #[test]
    fn well_formed_storage_round_trips() {
        let json = serde_json::to_string(&["Karachi", "Lahore"]).unwrap();
        let list = parse_stored(Some(json.clone()));
        assert_eq!(list, vec!["Karachi", "Lahore"]);

        // save(load()) is a no-op on content
        assert_eq!(serde_json::to_string(&list).unwrap(), json);
    }

    #[test]
    fn duplicate_add_leaves_length_unchanged() {
        let mut list = vec!["Karachi".to_string()];
        assert!(!push_unique(&mut list, "Karachi"));
        assert_eq!(list.len(), 1);

        // case-sensitive: "karachi" is a different entry
        assert!(push_unique(&mut list, "karachi"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut list = Vec::new();
        push_unique(&mut list, "Karachi");
        push_unique(&mut list, "Lahore");
        push_unique(&mut list, "Islamabad");
        assert_eq!(list, vec!["Karachi", "Lahore", "Islamabad"]);
    }

    #[test]
    fn remove_drops_every_exact_match() {
        let mut list = vec![
            "Karachi".to_string(),
            "Lahore".to_string(),
            "Karachi".to_string(),
        ];
        remove_all(&mut list, "Karachi");
        assert_eq!(list, vec!["Lahore"]);

        // removing a missing entry is a no-op
        remove_all(&mut list, "Quetta");
        assert_eq!(list, vec!["Lahore"]);
    }
}
