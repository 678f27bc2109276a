//! Prismic REST API v2 content source
//!
//! Every search must carry the repository's master ref, fetched once from the
//! API entry point. Listing cursors are the `next_page` URLs the API returns.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::OnceCell;

use super::{ContentSource, Ordering, QueryOptions};
use crate::config::ApiConfig;
use crate::content::{AdjacentPostRef, Cursor, ListingPage, PostSummary, RawContentDocument};
use crate::error::{Error, Result};
use crate::helpers::parse_timestamp;

/// HTTP client for one Prismic repository
pub struct PrismicSource {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
    document_type: String,
    master_ref: OnceCell<String>,
}

/// API entry point response
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// `documents/search` response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    next_page: Option<String>,
    #[serde(default)]
    results: Vec<RawContentDocument>,
}

impl PrismicSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(Error::Config("api.endpoint is not set".to_string()));
        }
        let client = Client::builder()
            .user_agent(concat!("spacetraveling/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
            document_type: config.document_type.clone(),
            master_ref: OnceCell::new(),
        })
    }

    async fn master_ref(&self) -> Result<&str> {
        let reference = self
            .master_ref
            .get_or_try_init(|| async {
                let mut request = self.client.get(&self.endpoint);
                if let Some(token) = &self.access_token {
                    request = request.query(&[("access_token", token)]);
                }
                tracing::debug!("GET {}", self.endpoint);
                let response = check_status(request.send().await?, &self.endpoint)?;
                let info: ApiInfo = response.json().await?;
                find_master_ref(&info)
            })
            .await?;
        Ok(reference.as_str())
    }

    /// Run a search with the given predicates
    async fn search(
        &self,
        predicates: &str,
        page_size: usize,
        ordering: Ordering,
    ) -> Result<SearchResponse> {
        let master_ref = self.master_ref().await?;
        let url = format!("{}/documents/search", self.endpoint);

        let mut params = vec![
            ("ref", master_ref.to_string()),
            ("q", predicates.to_string()),
            ("pageSize", page_size.max(1).to_string()),
            ("orderings", ordering.as_api_param().to_string()),
        ];
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }

        tracing::debug!("GET {} q={}", url, predicates);
        let response = check_status(self.client.get(&url).query(&params).send().await?, &url)?;
        Ok(response.json().await?)
    }

    fn type_predicate(&self) -> String {
        format!(r#"[at(document.type,"{}")]"#, escape_literal(&self.document_type))
    }

    /// Closest post on one side of `doc` by first publication date
    async fn adjacent(
        &self,
        millis: i64,
        before: bool,
    ) -> Result<Option<AdjacentPostRef>> {
        let (predicate, ordering) = if before {
            ("date.before", Ordering::FirstPublicationDesc)
        } else {
            ("date.after", Ordering::FirstPublicationAsc)
        };
        let q = format!(
            "[{}[{}(document.first_publication_date,{})]]",
            self.type_predicate(),
            predicate,
            millis
        );
        let response = self.search(&q, 1, ordering).await?;
        response
            .results
            .first()
            .map(AdjacentPostRef::from_document)
            .transpose()
    }
}

#[async_trait]
impl ContentSource for PrismicSource {
    async fn query(&self, options: &QueryOptions) -> Result<ListingPage> {
        let q = format!("[{}]", self.type_predicate());
        let response = self.search(&q, options.page_size, options.ordering).await?;
        Ok(to_listing_page(response))
    }

    async fn fetch_page(&self, cursor: &Cursor) -> Result<ListingPage> {
        let url = cursor.as_str();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::NotFound(format!("page for cursor {}", cursor)));
        }

        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            if !url.contains("access_token=") {
                request = request.query(&[("access_token", token)]);
            }
        }

        tracing::debug!("GET {}", url);
        let response = check_status(request.send().await?, url)?;
        let response: SearchResponse = response.json().await?;
        Ok(to_listing_page(response))
    }

    async fn get_by_uid(&self, uid: &str) -> Result<RawContentDocument> {
        let q = format!(
            r#"[[at(my.{}.uid,"{}")]]"#,
            escape_literal(&self.document_type),
            escape_literal(uid)
        );
        let response = self.search(&q, 1, Ordering::default()).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(uid.to_string()))
    }

    async fn neighbors(
        &self,
        doc: &RawContentDocument,
    ) -> Result<(Option<AdjacentPostRef>, Option<AdjacentPostRef>)> {
        let Some(first) = doc.first_publication_date.as_deref() else {
            return Ok((None, None));
        };
        let millis = parse_timestamp(first)
            .map_err(|e| Error::malformed(doc.uid.as_deref(), e.to_string()))?
            .timestamp_millis();

        let prev = self.adjacent(millis, true).await?;
        let next = self.adjacent(millis, false).await?;
        Ok((prev, next))
    }
}

fn find_master_ref(info: &ApiInfo) -> Result<String> {
    info.refs
        .iter()
        .find(|r| r.is_master_ref)
        .map(|r| r.reference.clone())
        .ok_or_else(|| Error::TransientFetch("API response has no master ref".to_string()))
}

fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(Error::TransientFetch(format!("HTTP {} for {}", status, url)));
    }
    Ok(response)
}

fn to_listing_page(response: SearchResponse) -> ListingPage {
    let results = response
        .results
        .iter()
        .filter_map(|doc| match PostSummary::from_document(doc) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("Skipping listing entry: {}", e);
                None
            }
        })
        .collect();

    ListingPage {
        results,
        next_page: response.next_page.filter(|u| !u.is_empty()).map(Cursor::new),
    }
}

/// Escape a string literal inside a predicate
fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
