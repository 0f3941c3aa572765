//! In-memory backend used by page-logic tests.

use super::{ApiError, ApiResult, AttractionQuery, CatalogApi};
use crate::models::{
    Attraction, AttractionId, AttractionList, AuthResponse, City, CityId, CityList,
    Favorite, FavoriteList,
};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

#[derive(Default)]
pub(crate) struct FakeCatalog {
    pub cities: Vec<City>,
    pub attractions: Vec<Attraction>,
    favorites: RefCell<BTreeSet<AttractionId>>,
    failures: RefCell<HashMap<&'static str, ApiError>>,
    calls: RefCell<Vec<String>>,
}

pub(crate) fn city(id: CityId, name: &str) -> City {
    City {
        id,
        name: name.to_string(),
        country: None,
        is_active: true,
        created_at: "2024-01-01T00:00:00".to_string(),
    }
}

pub(crate) fn attraction(id: AttractionId, city_id: CityId) -> Attraction {
    Attraction {
        id,
        city_id,
        name: format!("Attraction {id}"),
        description: None,
        address: None,
        photo_url: None,
        category: None,
        rating: 4.5,
        is_active: true,
        created_at: "2024-01-01T00:00:00".to_string(),
        is_favorite: false,
    }
}

impl FakeCatalog {
    pub fn new(cities: Vec<City>, attractions: Vec<Attraction>) -> Self {
        Self {
            cities,
            attractions,
            ..Default::default()
        }
    }

    /// `count` attractions for `city_id`, ids starting at `first_id`.
    pub fn with_city_attractions(
        mut self,
        city_id: CityId,
        first_id: AttractionId,
        count: usize,
    ) -> Self {
        for i in 0..count {
            self.attractions.push(attraction(first_id + i as i64, city_id));
        }
        self
    }

    pub fn with_favorites(self, ids: &[AttractionId]) -> Self {
        self.favorites.borrow_mut().extend(ids.iter().copied());
        self
    }

    /// Makes every later call to `op` fail with `err`.
    pub fn fail(&self, op: &'static str, err: ApiError) {
        self.failures.borrow_mut().insert(op, err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn favorite_ids(&self) -> Vec<AttractionId> {
        self.favorites.borrow().iter().copied().collect()
    }

    fn enter(&self, op: &'static str) -> ApiResult<()> {
        self.calls.borrow_mut().push(op.to_string());
        match self.failures.borrow().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn annotate(&self, mut a: Attraction) -> Attraction {
        a.is_favorite = self.favorites.borrow().contains(&a.id);
        a
    }

    fn find(&self, id: AttractionId) -> ApiResult<Attraction> {
        self.attractions
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .map(|a| self.annotate(a))
            .ok_or(ApiError::Http {
                status: 404,
                body: r#"{"detail":"Attraction not found"}"#.to_string(),
            })
    }
}

impl CatalogApi for FakeCatalog {
    async fn list_cities(&self) -> ApiResult<CityList> {
        self.enter("list_cities")?;
        Ok(CityList {
            items: self.cities.clone(),
            total: self.cities.len() as u64,
        })
    }

    async fn get_city(&self, id: CityId) -> ApiResult<City> {
        self.enter("get_city")?;
        self.cities
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ApiError::Http {
                status: 404,
                body: r#"{"detail":"City not found"}"#.to_string(),
            })
    }

    async fn list_attractions(&self, query: &AttractionQuery) -> ApiResult<AttractionList> {
        self.enter("list_attractions")?;
        let matching: Vec<Attraction> = self
            .attractions
            .iter()
            .filter(|a| query.city_id.map_or(true, |id| a.city_id == id))
            .filter(|a| query.category.is_none() || a.category == query.category)
            .cloned()
            .collect();

        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(10).max(1);
        let skip = ((page - 1) * page_size) as usize;

        Ok(AttractionList {
            total: matching.len() as u64,
            items: matching
                .into_iter()
                .skip(skip)
                .take(page_size as usize)
                .map(|a| self.annotate(a))
                .collect(),
            page: Some(page),
            page_size: Some(page_size),
        })
    }

    async fn get_attraction(&self, id: AttractionId) -> ApiResult<Attraction> {
        self.enter("get_attraction")?;
        self.find(id)
    }

    async fn list_favorites(&self) -> ApiResult<FavoriteList> {
        self.enter("list_favorites")?;
        let ids = self.favorite_ids();
        let mut items = Vec::with_capacity(ids.len());
        for (n, id) in ids.into_iter().enumerate() {
            let mut snapshot = self.find(id)?;
            // The embedded snapshot does not carry a reliable flag.
            snapshot.is_favorite = false;
            items.push(Favorite {
                id: n as i64 + 1,
                user_id: 1,
                attraction_id: id,
                created_at: "2024-01-02T00:00:00".to_string(),
                attraction: snapshot,
            });
        }
        Ok(FavoriteList {
            total: Some(items.len() as u64),
            items,
        })
    }

    async fn add_favorite(&self, attraction_id: AttractionId) -> ApiResult<Favorite> {
        self.enter("add_favorite")?;
        let snapshot = self.find(attraction_id)?;
        if !self.favorites.borrow_mut().insert(attraction_id) {
            return Err(ApiError::Http {
                status: 400,
                body: r#"{"detail":"Already in favorites"}"#.to_string(),
            });
        }
        Ok(Favorite {
            id: attraction_id,
            user_id: 1,
            attraction_id,
            created_at: "2024-01-02T00:00:00".to_string(),
            attraction: snapshot,
        })
    }

    async fn remove_favorite(&self, attraction_id: AttractionId) -> ApiResult<()> {
        self.enter("remove_favorite")?;
        if self.favorites.borrow_mut().remove(&attraction_id) {
            Ok(())
        } else {
            Err(ApiError::Http {
                status: 404,
                body: r#"{"detail":"Favorite not found"}"#.to_string(),
            })
        }
    }

    async fn authenticate(&self, init_data: &str) -> ApiResult<AuthResponse> {
        self.enter("authenticate")?;
        // Same shape as the real endpoint: a token pair, no user record.
        Ok(AuthResponse {
            user: None,
            access_token: format!("token-for:{init_data}"),
        })
    }

    async fn health(&self) -> ApiResult<serde_json::Value> {
        self.enter("health")?;
        Ok(serde_json::json!({ "status": "healthy" }))
    }
}
