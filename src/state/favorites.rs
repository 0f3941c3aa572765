use crate::api::{ApiResult, CatalogApi};
use crate::models::{Attraction, AttractionId, Favorite, FavoriteList};
use std::collections::HashSet;

/// Set of favorited attraction ids. Views derive `is_favorite` from it at render time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FavoriteIds {
    ids: HashSet<AttractionId>,
}

impl FavoriteIds {
    pub fn contains(&self, id: AttractionId) -> bool {
        self.ids.contains(&id)
    }

    pub fn set(&mut self, id: AttractionId, favorite: bool) {
        if favorite {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
    }

    /// Takes the server's per-record flags as the latest known state for those ids.
    pub fn absorb(&mut self, items: &[Attraction]) {
        for a in items {
            self.set(a.id, a.is_favorite);
        }
    }

    /// The favorites list is complete, so it replaces everything we knew.
    pub fn replace_with(&mut self, favorites: &[Favorite]) {
        self.ids = favorites.iter().map(|f| f.attraction_id).collect();
    }
}

/// Adds or removes depending on the current flag; resolves to the new flag.
pub(crate) async fn toggle_favorite<A: CatalogApi>(
    api: &A,
    id: AttractionId,
    currently_favorite: bool,
) -> ApiResult<bool> {
    if currently_favorite {
        api.remove_favorite(id).await?;
        Ok(false)
    } else {
        api.add_favorite(id).await?;
        Ok(true)
    }
}

/// Applies a toggle outcome. Failures leave the flag alone and are only logged.
pub(crate) fn record_toggle(
    favorites: &mut FavoriteIds,
    id: AttractionId,
    outcome: ApiResult<bool>,
) -> bool {
    match outcome {
        Ok(now_favorite) => {
            favorites.set(id, now_favorite);
            true
        }
        Err(e) => {
            log::error!("Error toggling favorite for attraction {id}: {e}");
            false
        }
    }
}

/// Favorites page state. Loads the full list; no pagination.
#[derive(Clone, Debug)]
pub(crate) struct FavoritesState {
    pub favorites: Vec<Favorite>,
    pub loading: bool,
    pub error: Option<String>,
    seq: u64,
}

impl Default for FavoritesState {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesState {
    pub fn new() -> Self {
        Self {
            favorites: vec![],
            loading: true,
            error: None,
            seq: 0,
        }
    }

    pub fn begin_load(&mut self) -> u64 {
        self.seq = self.seq.saturating_add(1);
        self.loading = true;
        self.error = None;
        self.seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.seq == seq
    }

    /// Returns false when a newer load superseded this one.
    pub fn apply(&mut self, seq: u64, result: ApiResult<FavoriteList>) -> bool {
        if !self.is_current(seq) {
            return false;
        }

        match result {
            Ok(list) => {
                self.favorites = list.items;
            }
            Err(e) if e.is_unauthorized() => {}
            Err(e) => {
                log::error!("Error loading favorites: {e}");
                self.error = Some(format!("Failed to load favorites: {e}"));
            }
        }
        self.loading = false;
        true
    }

    /// Embedded snapshots, always flagged as favorites whatever the server sent.
    pub fn display_attractions(&self) -> Vec<Attraction> {
        self.favorites
            .iter()
            .map(|f| Attraction {
                is_favorite: true,
                ..f.attraction.clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{attraction, city, FakeCatalog};
    use crate::api::ApiError;
    use futures::executor::block_on;

    fn with_flag(id: AttractionId, favorite: bool) -> Attraction {
        Attraction {
            is_favorite: favorite,
            ..attraction(id, 1)
        }
    }

    #[test]
    fn test_set_wins_over_stale_embedded_flag() {
        let mut ids = FavoriteIds::default();
        ids.absorb(&[with_flag(1, true), with_flag(2, false)]);
        ids.set(1, false);
        ids.set(2, true);
        assert!(!ids.contains(1));
        assert!(ids.contains(2));
    }

    #[test]
    fn test_absorb_tracks_server_flags() {
        let mut ids = FavoriteIds::default();
        ids.set(1, true);
        ids.absorb(&[with_flag(1, false), with_flag(3, true)]);
        assert!(!ids.contains(1));
        assert!(ids.contains(3));
        assert!(!ids.contains(2));
    }

    #[test]
    fn test_replace_with_favorites_list() {
        let api = FakeCatalog::new(vec![city(1, "Rome")], vec![])
            .with_city_attractions(1, 1, 5)
            .with_favorites(&[2, 4]);
        let list = block_on(api.list_favorites()).expect("favorites");

        let mut ids = FavoriteIds::default();
        ids.set(5, true);
        ids.replace_with(&list.items);
        assert!(ids.contains(2) && ids.contains(4));
        assert!(!ids.contains(5));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let api = FakeCatalog::new(vec![city(1, "Rome")], vec![]).with_city_attractions(1, 1, 3);

        assert_eq!(block_on(toggle_favorite(&api, 2, false)), Ok(true));
        assert_eq!(api.favorite_ids(), vec![2]);

        assert_eq!(block_on(toggle_favorite(&api, 2, true)), Ok(false));
        assert!(api.favorite_ids().is_empty());
    }

    #[test]
    fn test_record_toggle_keeps_flag_on_failure() {
        let mut ids = FavoriteIds::default();
        ids.set(7, true);

        let changed = record_toggle(&mut ids, 7, Err(ApiError::Network("offline".to_string())));
        assert!(!changed);
        assert!(ids.contains(7));

        assert!(record_toggle(&mut ids, 7, Ok(false)));
        assert!(!ids.contains(7));
    }

    #[test]
    fn test_favorites_page_shows_last_fetch_all_flagged() {
        let api = FakeCatalog::new(vec![city(1, "Rome")], vec![])
            .with_city_attractions(1, 10, 4)
            .with_favorites(&[11, 13]);

        let mut state = FavoritesState::new();
        let seq = state.begin_load();
        assert!(state.apply(seq, block_on(api.list_favorites())));

        let shown = state.display_attractions();
        assert_eq!(shown.iter().map(|a| a.id).collect::<Vec<_>>(), vec![11, 13]);
        assert!(shown.iter().all(|a| a.is_favorite));
        assert!(!state.loading);

        // A removal elsewhere followed by a refresh drops the item.
        block_on(api.remove_favorite(11)).expect("remove");
        let seq = state.begin_load();
        state.apply(seq, block_on(api.list_favorites()));
        assert_eq!(
            state.display_attractions().iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![13]
        );
    }

    #[test]
    fn test_favorites_stale_load_is_discarded() {
        let mut state = FavoritesState::new();
        let first = state.begin_load();
        let second = state.begin_load();

        let fresh = FavoriteList {
            items: vec![],
            total: Some(0),
        };
        assert!(state.apply(second, Ok(fresh)));
        assert!(!state.apply(
            first,
            Err(ApiError::Http {
                status: 500,
                body: String::new()
            })
        ));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_favorites_failure_sets_error_but_unauthorized_does_not() {
        let mut state = FavoritesState::new();
        let seq = state.begin_load();
        state.apply(seq, Err(ApiError::Network("offline".to_string())));
        assert!(state.error.is_some());

        let seq = state.begin_load();
        state.apply(seq, Err(ApiError::Unauthorized));
        assert!(state.error.is_none());
    }
}
