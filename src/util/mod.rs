pub(crate) const CARD_PLACEHOLDER: &str = "https://via.placeholder.com/300x200?text=No+Image";
pub(crate) const DETAIL_PLACEHOLDER: &str = "https://via.placeholder.com/800x400?text=No+Image";

/// Local wall-clock time, e.g. `14:03:27`.
pub(crate) fn clock_label() -> String {
    // Use system local timezone (browser runtime).
    let d = js_sys::Date::new_0();
    format!(
        "{:02}:{:02}:{:02}",
        d.get_hours(),
        d.get_minutes(),
        d.get_seconds()
    )
}

pub(crate) fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

pub(crate) fn photo_or<'a>(photo_url: Option<&'a str>, placeholder: &'a str) -> &'a str {
    photo_url
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(placeholder)
}

/// Swaps a broken `<img>` source for the placeholder, once.
pub(crate) fn fallback_image(ev: &web_sys::Event, placeholder: &str) {
    use wasm_bindgen::JsCast;

    if let Some(img) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok())
    {
        if img.src() != placeholder {
            img.set_src(placeholder);
        }
    }
}
