use serde::{Deserialize, Serialize};

pub(crate) type CityId = i64;
pub(crate) type AttractionId = i64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct City {
    pub id: CityId,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Attraction {
    pub id: AttractionId,
    pub city_id: CityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,

    /// Overlay value; the backend fills it per request, the client re-derives it.
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub attraction_id: AttractionId,
    #[serde(default)]
    pub created_at: String,
    pub attraction: Attraction,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct CityList {
    pub items: Vec<City>,
    pub total: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct AttractionList {
    pub items: Vec<Attraction>,
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct FavoriteList {
    pub items: Vec<Favorite>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Backend user record returned by the Telegram handshake.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct AuthUser {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telegram_id: Option<i64>,
    #[serde(default)]
    pub telegram_username: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// `POST /auth/telegram`. The backend answers with a bare token pair; `user` is
/// only present on backends that embed the account record.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AuthResponse {
    #[serde(default)]
    pub user: Option<AuthUser>,
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct TelegramAuthRequest {
    pub init_data: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AddFavoriteRequest {
    pub attraction_id: AttractionId,
}

/// User identity embedded by the Telegram client (`initDataUnsafe.user`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TelegramUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl TelegramUser {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.trim().is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}
