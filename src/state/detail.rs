use crate::api::{ApiResult, CatalogApi};
use crate::models::{Attraction, AttractionId};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DetailState {
    Loading,
    Loaded(Attraction),
    NotFound,
    Failed(String),
}

impl DetailState {
    pub fn from_result(result: ApiResult<Attraction>) -> Self {
        match result {
            Ok(a) => Self::Loaded(a),
            Err(e) if e.is_not_found() => Self::NotFound,
            // Navigation to the entry point is already under way.
            Err(e) if e.is_unauthorized() => Self::Loading,
            Err(e) => {
                log::error!("Error loading attraction: {e}");
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn attraction(&self) -> Option<&Attraction> {
        match self {
            Self::Loaded(a) => Some(a),
            _ => None,
        }
    }
}

/// Path segment to id. Anything non-numeric is simply "not found".
pub(crate) fn parse_attraction_id(raw: &str) -> Option<AttractionId> {
    raw.trim().parse::<AttractionId>().ok().filter(|id| *id > 0)
}

pub(crate) async fn load_attraction<A: CatalogApi>(api: &A, raw_id: &str) -> DetailState {
    match parse_attraction_id(raw_id) {
        Some(id) => DetailState::from_result(api.get_attraction(id).await),
        None => DetailState::NotFound,
    }
}
