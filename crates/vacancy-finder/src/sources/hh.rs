use serde::Deserialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use tracing::{info, instrument};

use super::{SourceError, VacancySource};
use crate::config::SourceConfig;

/// One page of the hh.ru `/vacancies` search response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingPage {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    pages: u32,
}

/// Blocking client for the hh.ru public API. Requests run on a private
/// current-thread runtime so callers stay synchronous.
pub struct HeadHunterClient {
    http: reqwest::Client,
    runtime: Runtime,
    base_url: String,
    area: u32,
}

impl HeadHunterClient {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Self::with_client(config, http)
    }

    /// Uses a preconfigured HTTP client; the config's timeout and user agent
    /// are then the caller's responsibility.
    pub fn with_client(config: &SourceConfig, http: reqwest::Client) -> Result<Self, SourceError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| SourceError::Runtime(err.to_string()))?;

        Ok(Self {
            http,
            runtime,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            area: config.area,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/vacancies", self.base_url)
    }

    fn fetch_page(&self, query: &str, per_page: u32, page: u32) -> Result<ListingPage, SourceError> {
        self.runtime.block_on(self.request_page(query, per_page, page))
    }

    async fn request_page(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<ListingPage, SourceError> {
        let url = self.search_url();
        let params = [
            ("text", query.to_string()),
            ("area", self.area.to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        info!(page, "fetched listing page");
        Ok(response.json::<ListingPage>().await?)
    }
}

impl std::fmt::Debug for HeadHunterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadHunterClient")
            .field("base_url", &self.base_url)
            .field("area", &self.area)
            .finish_non_exhaustive()
    }
}

impl VacancySource for HeadHunterClient {
    #[instrument(skip(self))]
    fn fetch(&self, query: &str, per_page: u32, pages: u32) -> Result<Vec<Value>, SourceError> {
        let items = collect_pages(pages, |page| self.fetch_page(query, per_page, page))?;
        info!(count = items.len(), "fetched listing items");
        Ok(items)
    }
}

/// Walks pages from zero and stops after the last page the source reports.
pub(crate) fn collect_pages<F>(pages: u32, mut fetch_page: F) -> Result<Vec<Value>, SourceError>
where
    F: FnMut(u32) -> Result<ListingPage, SourceError>,
{
    let mut items = Vec::new();

    for page in 0..pages {
        let listing = fetch_page(page)?;
        items.extend(listing.items);
        if page + 1 >= listing.pages {
            break;
        }
    }

    Ok(items)
}
