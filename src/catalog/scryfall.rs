use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{CatalogError, CatalogSource};
use crate::domain::{RawPrinting, SetType};

pub const SCRYFALL_API: &str = "https://api.scryfall.com";

const USER_AGENT: &str = concat!("card-placeholders/", env!("CARGO_PKG_VERSION"));
const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One card object from a Scryfall search page.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScryfallPrinting {
    pub name: String,
    pub set: String,
    #[serde(default)]
    pub set_type: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub prices: ScryfallPrices,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    /// For double-faced cards, colours live on the faces
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub games: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScryfallPrices {
    pub usd: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CardFace {
    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

impl From<ScryfallPrinting> for RawPrinting {
    fn from(card: ScryfallPrinting) -> Self {
        let face_colors = card
            .card_faces
            .and_then(|faces| faces.into_iter().next())
            .and_then(|face| face.colors);
        RawPrinting {
            available_in_paper: card.games.iter().any(|g| g == "paper"),
            set_code: card.set,
            set_type: SetType::from(card.set_type),
            rarity: card.rarity.into(),
            price_usd: card.prices.usd,
            colors: card.colors,
            face_colors,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Vec<ScryfallPrinting>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_page: Option<String>,
}

/// Scryfall API error response
#[derive(Debug, Deserialize)]
struct ScryfallError {
    code: String,
    details: String,
}

/// Blocking Scryfall search client. Requests are spaced out by a fixed delay.
pub struct ScryfallClient {
    http: Client,
    base_url: String,
    request_delay: Duration,
    last_request: Cell<Option<Instant>>,
}

impl ScryfallClient {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(SCRYFALL_API)
    }

    pub fn with_base_url<S: Into<String>>(base_url: S) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            last_request: Cell::new(None),
        })
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    fn pace(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.request_delay {
                thread::sleep(self.request_delay - elapsed);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }

    /// Returns `None` when the catalog has no match for the query.
    fn fetch_page(&self, request: RequestBuilder) -> Result<Option<SearchPage>, CatalogError> {
        self.pace();
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            return Ok(Some(serde_json::from_str(&body)?));
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        match serde_json::from_str::<ScryfallError>(&body) {
            Ok(error) => Err(CatalogError::Api {
                code: error.code,
                details: error.details,
            }),
            Err(_) => Err(CatalogError::HttpStatus(status)),
        }
    }
}

impl CatalogSource for ScryfallClient {
    fn printings(&self, name: &str) -> Result<Vec<RawPrinting>, CatalogError> {
        let url = format!("{}/cards/search", self.base_url);
        info!("Searching Scryfall printings for {}", name);

        let mut request = self
            .http
            .get(&url)
            .query(&[("q", exact_name_query(name)), ("unique", "prints".to_string())]);
        let mut printings = Vec::new();
        loop {
            let Some(page) = self.fetch_page(request)? else {
                debug!("no Scryfall match for {}", name);
                break;
            };
            printings.extend(page.data.into_iter().map(RawPrinting::from));
            match page.next_page {
                Some(next) if page.has_more => request = self.http.get(next),
                _ => break,
            }
        }
        debug!("{} printing(s) found for {}", printings.len(), name);
        Ok(printings)
    }
}

/// Scryfall exact-name search (`!"Name"`).
pub fn exact_name_query(name: &str) -> String {
    format!("!\"{}\"", name.replace('"', "\\\""))
}
