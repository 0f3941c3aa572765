//! Bridge to the Telegram Mini App host (`window.Telegram.WebApp`).

use crate::models::TelegramUser;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ThemeParams {
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub hint_color: Option<String>,
    #[serde(default)]
    pub link_color: Option<String>,
    #[serde(default)]
    pub button_color: Option<String>,
    #[serde(default)]
    pub button_text_color: Option<String>,
    #[serde(default)]
    pub secondary_bg_color: Option<String>,
}

const DEFAULT_BG: &str = "#ffffff";

impl ThemeParams {
    /// `--tg-theme-*` variables with the light defaults filled in.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let pick = |v: &Option<String>, default: &str| {
            v.as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(default)
                .to_string()
        };

        vec![
            ("--tg-theme-bg-color", pick(&self.bg_color, DEFAULT_BG)),
            ("--tg-theme-text-color", pick(&self.text_color, "#000000")),
            ("--tg-theme-hint-color", pick(&self.hint_color, "#999999")),
            ("--tg-theme-link-color", pick(&self.link_color, "#3390ec")),
            ("--tg-theme-button-color", pick(&self.button_color, "#3390ec")),
            (
                "--tg-theme-button-text-color",
                pick(&self.button_text_color, "#ffffff"),
            ),
            (
                "--tg-theme-secondary-bg-color",
                pick(&self.secondary_bg_color, "#f5f5f5"),
            ),
        ]
    }

    pub fn background(&self) -> String {
        self.bg_color
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BG.to_string())
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ColorScheme {
    Light,
    Dark,
}

/// What the host embedding context tells us. Read-only for the app.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct HostSession {
    pub user: Option<TelegramUser>,
    /// Signed payload, forwarded to the backend as-is.
    pub init_data: Option<String>,
    pub theme: Option<ThemeParams>,
    pub color_scheme: Option<ColorScheme>,
    pub is_ready: bool,
}

#[derive(Deserialize, Default)]
struct InitDataUnsafe {
    #[serde(default)]
    user: Option<TelegramUser>,
}

static HOST: OnceCell<HostSession> = OnceCell::new();

impl HostSession {
    /// Probes the host once per process; later calls return the same snapshot.
    pub fn detect() -> &'static HostSession {
        HOST.get_or_init(probe_host)
    }

    /// Assembles a session from the raw WebApp fields.
    pub(crate) fn from_fields(
        init_data: Option<String>,
        init_data_unsafe_json: Option<&str>,
        theme_json: Option<&str>,
        color_scheme: Option<&str>,
    ) -> Self {
        let user = init_data_unsafe_json
            .and_then(|json| match serde_json::from_str::<InitDataUnsafe>(json) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::warn!("ignoring malformed initDataUnsafe: {e}");
                    None
                }
            })
            .and_then(|v| v.user);

        let theme = theme_json.and_then(|json| serde_json::from_str::<ThemeParams>(json).ok());

        Self {
            user,
            init_data: init_data.filter(|d| !d.trim().is_empty()),
            theme,
            color_scheme: color_scheme.and_then(|s| s.trim().parse().ok()),
            is_ready: true,
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.is_ready
    }
}

fn web_app() -> Option<js_sys::Object> {
    let telegram = web_sys::window()?.get("Telegram")?;
    let web_app = js_sys::Reflect::get(&telegram, &"WebApp".into()).ok()?;
    if web_app.is_object() {
        web_app.dyn_into::<js_sys::Object>().ok()
    } else {
        None
    }
}

fn call_method(target: &JsValue, name: &str) {
    let Ok(f) = js_sys::Reflect::get(target, &name.into()) else {
        return;
    };
    if let Some(f) = f.dyn_ref::<js_sys::Function>() {
        if let Err(e) = f.call0(target) {
            log::warn!("Telegram.WebApp.{name}() failed: {e:?}");
        }
    }
}

fn string_field(target: &JsValue, name: &str) -> Option<String> {
    js_sys::Reflect::get(target, &name.into())
        .ok()
        .and_then(|v| v.as_string())
}

fn json_field(target: &JsValue, name: &str) -> Option<String> {
    let value = js_sys::Reflect::get(target, &name.into()).ok()?;
    if !value.is_object() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}

fn probe_host() -> HostSession {
    let Some(web_app) = web_app() else {
        log::info!("not embedded in Telegram; running without host session");
        return HostSession::default();
    };

    call_method(&web_app, "ready");
    call_method(&web_app, "expand");

    let init_data_unsafe = json_field(&web_app, "initDataUnsafe");
    let theme = json_field(&web_app, "themeParams");
    let session = HostSession::from_fields(
        string_field(&web_app, "initData"),
        init_data_unsafe.as_deref(),
        theme.as_deref(),
        string_field(&web_app, "colorScheme").as_deref(),
    );

    log::info!(
        "Telegram host ready (user: {}, signed payload: {})",
        session
            .user
            .as_ref()
            .map(|u| u.id.to_string())
            .unwrap_or_else(|| "-".to_string()),
        session.init_data.is_some()
    );
    session
}

/// Pushes the host theme into CSS variables on `<html>`.
pub(crate) fn apply_theme(session: &HostSession) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let Some(root) = document.document_element() {
        if let Some(scheme) = session.color_scheme {
            let _ = root.set_attribute("data-color-scheme", scheme.as_ref());
        }

        if let Some(theme) = &session.theme {
            if let Some(root) = root.dyn_ref::<web_sys::HtmlElement>() {
                let style = root.style();
                for (name, value) in theme.css_variables() {
                    let _ = style.set_property(name, &value);
                }
            }
        }
    }

    if session.is_embedded() {
        let bg = session
            .theme
            .as_ref()
            .map(ThemeParams::background)
            .unwrap_or_else(|| DEFAULT_BG.to_string());
        if let Some(body) = document.body() {
            let _ = body.style().set_property("background-color", &bg);
        }
    }
}
