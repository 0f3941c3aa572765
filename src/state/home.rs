//! Home page orchestration: bootstrap, city selection and paged attraction loading.

use crate::api::{ApiError, ApiResult, AttractionQuery, CatalogApi};
use crate::models::{Attraction, AttractionList, AuthResponse, City, CityId};
use crate::storage::TokenStore;

pub(crate) const PAGE_SIZE: u32 = 10;

pub(crate) struct Bootstrap {
    pub auth: Option<AuthResponse>,
    pub cities: Vec<City>,
}

/// Handshake (when a signed payload is available and we are not signed in yet),
/// then the city list.
pub(crate) async fn bootstrap<A: CatalogApi>(
    api: &A,
    tokens: &dyn TokenStore,
    init_data: Option<&str>,
    already_authenticated: bool,
) -> ApiResult<Bootstrap> {
    let auth = match init_data {
        Some(init_data) if !already_authenticated => {
            let response = api.authenticate(init_data).await?;
            tokens.set(&response.access_token);
            Some(response)
        }
        _ => None,
    };

    let cities = api.list_cities().await?;
    Ok(Bootstrap {
        auth,
        cities: cities.items,
    })
}

/// A fetch issued by [`HomeState`]. Only the latest ticket may land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    seq: u64,
    pub query: AttractionQuery,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum HomePhase {
    Loading,
    Failed(String),
    Ready,
}

#[derive(Clone, Debug)]
pub(crate) struct HomeState {
    pub cities: Vec<City>,
    pub selected_city: Option<CityId>,
    pub attractions: Vec<Attraction>,
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    page_size: u32,
    seq: u64,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeState {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            cities: vec![],
            selected_city: None,
            attractions: vec![],
            page: 1,
            has_more: false,
            loading: true,
            error: None,
            page_size: page_size.max(1),
            seq: 0,
        }
    }

    pub fn phase(&self) -> HomePhase {
        if self.loading && self.attractions.is_empty() {
            HomePhase::Loading
        } else if let Some(e) = &self.error {
            HomePhase::Failed(e.clone())
        } else {
            HomePhase::Ready
        }
    }

    pub fn selected(&self) -> Option<&City> {
        let id = self.selected_city?;
        self.cities.iter().find(|c| c.id == id)
    }

    /// The selector only makes sense with a choice to make.
    pub fn shows_city_selector(&self) -> bool {
        self.cities.len() > 1
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading
    }

    /// Stores the cities and selects the first one, which starts the first fetch.
    pub fn bootstrap_succeeded(&mut self, cities: Vec<City>) -> Option<FetchTicket> {
        self.cities = cities;
        match self.cities.first().map(|c| c.id) {
            Some(first) => self.select_city(first),
            None => {
                self.loading = false;
                None
            }
        }
    }

    pub fn bootstrap_failed(&mut self, e: &ApiError) {
        log::error!("Initialization error: {e}");
        if e.is_unauthorized() {
            // The client is already navigating back to the entry point.
            return;
        }
        self.error = Some(format!("Failed to load: {e}"));
        self.loading = false;
    }

    /// Resets pagination synchronously, before the new fetch resolves.
    pub fn select_city(&mut self, id: CityId) -> Option<FetchTicket> {
        if !self.cities.iter().any(|c| c.id == id) {
            log::warn!("ignoring selection of unknown city {id}");
            return None;
        }
        self.selected_city = Some(id);
        self.restart()
    }

    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.can_load_more() || self.selected_city.is_none() {
            return None;
        }
        self.page += 1;
        self.issue()
    }

    /// A card toggled a favorite: start over from page 1.
    pub fn favorite_toggled(&mut self) -> Option<FetchTicket> {
        self.selected_city?;
        self.restart()
    }

    fn restart(&mut self) -> Option<FetchTicket> {
        self.page = 1;
        self.has_more = false;
        self.attractions.clear();
        self.issue()
    }

    fn issue(&mut self) -> Option<FetchTicket> {
        let city_id = self.selected_city?;
        self.seq = self.seq.saturating_add(1);
        self.loading = true;
        self.error = None;
        Some(FetchTicket {
            seq: self.seq,
            query: AttractionQuery::for_city(city_id, self.page, self.page_size),
        })
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.seq
    }

    /// Lands a page. Returns false (and changes nothing) for a superseded ticket.
    pub fn apply_page(
        &mut self,
        ticket: &FetchTicket,
        result: ApiResult<AttractionList>,
    ) -> bool {
        if !self.is_current(ticket) {
            log::debug!("dropping stale attractions response (page {:?})", ticket.query.page);
            return false;
        }

        match result {
            Ok(list) => {
                let returned = list.items.len();
                if ticket.query.page.unwrap_or(1) <= 1 {
                    self.attractions = list.items;
                } else {
                    self.attractions.extend(list.items);
                }
                self.has_more = returned == self.page_size as usize
                    && (self.attractions.len() as u64) < list.total;
            }
            Err(e) if e.is_unauthorized() => {}
            Err(e) => {
                log::error!("Error loading attractions: {e}");
                self.error = Some(format!("Failed to load attractions: {e}"));
            }
        }
        self.loading = false;
        true
    }
}
