use crate::api::{ApiError, AttractionQuery, CatalogApi};

/// Timestamped result lines shown on the `/test` page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DiagnosticLog {
    lines: Vec<String>,
}

impl DiagnosticLog {
    pub fn push(&mut self, clock: &str, message: impl Into<String>) {
        self.lines.push(format!("{clock}: {}", message.into()));
    }

    pub fn extend(&mut self, clock: &str, messages: Vec<String>) {
        for m in messages {
            self.push(clock, m);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn describe_error(e: &ApiError, with_body: bool) -> Vec<String> {
    let mut out = vec![format!("Error: {e}")];
    if let Some(status) = e.status() {
        out.push(format!("Status: {status}"));
    }
    if with_body {
        if let Some(body) = e.body() {
            out.push(format!("Data: {body}"));
        }
    }
    out
}

pub(crate) async fn probe_cities<A: CatalogApi>(api: &A) -> Vec<String> {
    match api.list_cities().await {
        Ok(list) => vec![
            format!("OK: received cities: {}", list.total),
            format!(
                "Data: {}",
                serde_json::to_string(&list.items).unwrap_or_default()
            ),
        ],
        Err(e) => describe_error(&e, true),
    }
}

pub(crate) async fn probe_attractions<A: CatalogApi>(api: &A) -> Vec<String> {
    match api
        .list_attractions(&AttractionQuery::for_city(1, 1, 5))
        .await
    {
        Ok(list) => {
            let mut out = vec![format!("OK: received attractions: {}", list.items.len())];
            out.extend(list.items.iter().map(|a| format!("  - {}", a.name)));
            out
        }
        Err(e) => describe_error(&e, false),
    }
}

pub(crate) async fn probe_health<A: CatalogApi>(api: &A) -> Vec<String> {
    match api.health().await {
        Ok(v) => vec![format!("OK: direct request succeeded: {v}")],
        Err(e) => vec![format!("Direct request failed: {e}")],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    Cities,
    Attractions,
    Direct,
}

impl Probe {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cities => "Test Cities",
            Self::Attractions => "Test Attractions",
            Self::Direct => "Test Direct",
        }
    }

    pub fn announcement(self) -> &'static str {
        match self {
            Self::Cities => "Testing cities API...",
            Self::Attractions => "Testing attractions API...",
            Self::Direct => "Testing direct request to the server...",
        }
    }

    pub async fn run<A: CatalogApi>(self, api: &A) -> Vec<String> {
        match self {
            Self::Cities => probe_cities(api).await,
            Self::Attractions => probe_attractions(api).await,
            Self::Direct => probe_health(api).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{city, FakeCatalog};
    use futures::executor::block_on;

    #[test]
    fn test_log_prefixes_clock_and_clears() {
        let mut log = DiagnosticLog::default();
        assert!(log.is_empty());
        log.push("12:00:01", "Testing cities API...");
        log.extend("12:00:02", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            log.lines(),
            &[
                "12:00:01: Testing cities API...".to_string(),
                "12:00:02: a".to_string(),
                "12:00:02: b".to_string(),
            ]
        );
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_probe_cities_reports_total_and_items() {
        let api = FakeCatalog::new(vec![city(1, "Rome"), city(2, "Paris")], vec![]);
        let lines = block_on(probe_cities(&api));
        assert_eq!(lines[0], "OK: received cities: 2");
        assert!(lines[1].starts_with("Data: [") && lines[1].contains("Paris"));
    }

    #[test]
    fn test_probe_cities_reports_status_and_body() {
        let api = FakeCatalog::new(vec![], vec![]);
        api.fail(
            "list_cities",
            ApiError::Http {
                status: 502,
                body: "bad gateway".to_string(),
            },
        );
        let lines = block_on(probe_cities(&api));
        assert_eq!(
            lines,
            vec![
                "Error: Request failed (502): bad gateway".to_string(),
                "Status: 502".to_string(),
                "Data: bad gateway".to_string(),
            ]
        );
    }

    #[test]
    fn test_probe_attractions_lists_first_city_names() {
        let api = FakeCatalog::new(vec![city(1, "Rome")], vec![])
            .with_city_attractions(1, 1, 7)
            .with_city_attractions(2, 50, 3);
        let lines = block_on(probe_attractions(&api));
        assert_eq!(lines[0], "OK: received attractions: 5");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "  - Attraction 1");
    }

    #[test]
    fn test_probe_health() {
        let api = FakeCatalog::default();
        assert_eq!(
            block_on(probe_health(&api)),
            vec![r#"OK: direct request succeeded: {"status":"healthy"}"#.to_string()]
        );

        api.fail("health", ApiError::Network("dns".to_string()));
        assert_eq!(
            block_on(probe_health(&api)),
            vec!["Direct request failed: Network error: dns".to_string()]
        );
    }

    #[test]
    fn test_probe_dispatch() {
        let api = FakeCatalog::new(vec![city(1, "Rome")], vec![]);
        let lines = block_on(Probe::Cities.run(&api));
        assert_eq!(lines[0], "OK: received cities: 1");
        assert_eq!(api.calls(), vec!["list_cities"]);
        assert_eq!(Probe::Direct.label(), "Test Direct");
    }
}
