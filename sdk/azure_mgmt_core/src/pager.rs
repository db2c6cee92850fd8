//! Next-link pagination for list operations.
//!
//! Every ARM list operation returns `{"value": [...], "nextLink": "..."}`.
//! A [`Pager`] fetches the first page from the operation path and keeps
//! following `nextLink` until it is absent or empty.
//!
//! ```rust,no_run
//! # use azure_mgmt_core::client::ArmClient;
//! # use azure_mgmt_core::pager::{PagedList, Pager};
//! # async fn example(client: &ArmClient) -> azure_mgmt_core::error::ArmResult<()> {
//! let mut pager: Pager<PagedList<serde_json::Value>> =
//!     Pager::new(client, "/subscriptions/sub/resourcegroups?api-version=2021-04-01");
//!
//! while pager.more() {
//!     if let Some(page) = pager.next_page().await? {
//!         println!("{} items", page.value.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;

use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::{read_json, ArmClient};
use crate::error::{ArmError, ArmResult};

/// A single page of a list operation.
pub trait Page: DeserializeOwned {
    /// The element type of the page.
    type Item;

    /// The continuation link, if the service returned one.
    fn next_link(&self) -> Option<&str>;

    /// Consume the page, yielding its elements.
    fn into_items(self) -> Vec<Self::Item>;
}

/// The standard ARM list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

impl<T: DeserializeOwned> Page for PagedList<T> {
    type Item = T;

    fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    fn into_items(self) -> Vec<T> {
        self.value
    }
}

/// Iterates the pages of a list operation.
#[derive(Debug)]
pub struct Pager<P> {
    client: ArmClient,
    next: Option<String>,
    pages_fetched: usize,
    _page: PhantomData<fn() -> P>,
}

impl<P: Page> Pager<P> {
    /// Create a pager whose first request goes to `first` (path or absolute URL).
    pub fn new(client: &ArmClient, first: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            next: Some(first.into()),
            pages_fetched: 0,
            _page: PhantomData,
        }
    }

    /// Whether another page can be fetched.
    pub fn more(&self) -> bool {
        self.next.is_some()
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    ///
    /// On error the continuation is kept, so the same page can be retried.
    pub async fn next_page(&mut self) -> ArmResult<Option<P>> {
        let Some(link) = self.next.as_deref() else {
            return Ok(None);
        };

        let response = self.client.get(link).await?;
        let page = read_json::<P>(response).await?;

        self.next = page
            .next_link()
            .filter(|next| !next.is_empty())
            .map(str::to_owned);
        self.pages_fetched += 1;

        tracing::debug!(
            page = self.pages_fetched,
            more = self.next.is_some(),
            "fetched page"
        );
        Ok(Some(page))
    }

    /// Turn the pager into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = ArmResult<P>> {
        stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok::<_, ArmError>(page.map(|page| (page, pager)))
        })
    }

    /// Turn the pager into a stream of individual items across all pages.
    pub fn into_items(self) -> impl Stream<Item = ArmResult<P::Item>> {
        self.into_stream()
            .map_ok(|page| stream::iter(page.into_items().into_iter().map(Ok::<_, ArmError>)))
            .try_flatten()
    }

    /// Fetch every remaining page and collect all items.
    pub async fn collect_all(mut self) -> ArmResult<Vec<P::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.into_items());
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_mock_client;
    use futures::TryStreamExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_two_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("api-version", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"name": "a"}, {"name": "b"}],
                "nextLink": format!("{}/items/page2?api-version=1&$skiptoken=xyz", server.uri())
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/items/page2"))
            .and(query_param("$skiptoken", "xyz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"name": "c"}],
                "nextLink": ""
            })))
            .mount(server)
            .await;
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[tokio::test]
    async fn follows_next_link_until_empty() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;
        let client = setup_mock_client(&server).await;

        let mut pager: Pager<PagedList<Named>> = Pager::new(&client, "/items?api-version=1");
        assert!(pager.more());

        let first = pager.next_page().await.unwrap().expect("first page");
        assert_eq!(first.value.len(), 2);
        assert!(pager.more());

        let second = pager.next_page().await.unwrap().expect("second page");
        assert_eq!(second.value[0].name, "c");
        assert!(!pager.more());
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.pages_fetched(), 2);
    }

    #[tokio::test]
    async fn collect_all_flattens_pages() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;
        let client = setup_mock_client(&server).await;

        let pager: Pager<PagedList<Named>> = Pager::new(&client, "/items?api-version=1");
        let names: Vec<String> = pager
            .collect_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn item_stream_yields_every_item() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;
        let client = setup_mock_client(&server).await;

        let pager: Pager<PagedList<Named>> = Pager::new(&client, "/items?api-version=1");
        let items: Vec<Named> = pager.into_items().try_collect().await.unwrap();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn page_stream_surfaces_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": "AuthorizationFailed", "message": "denied"}
            })))
            .mount(&server)
            .await;
        let client = setup_mock_client(&server).await;

        let pager: Pager<PagedList<Named>> = Pager::new(&client, "/broken");
        let result: ArmResult<Vec<PagedList<Named>>> = pager.into_stream().try_collect().await;
        match result.unwrap_err() {
            ArmError::Api { code, .. } => assert_eq!(code, "AuthorizationFailed"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_page_can_be_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "error": {"code": "Conflict", "message": "busy"}
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"name": "a"}]
            })))
            .mount(&server)
            .await;
        let client = setup_mock_client(&server).await;

        let mut pager: Pager<PagedList<Named>> = Pager::new(&client, "/flaky");
        let err = pager.next_page().await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert!(pager.more());
        assert_eq!(pager.pages_fetched(), 0);

        let page = pager.next_page().await.unwrap().expect("page after retry");
        assert_eq!(page.value[0].name, "a");
        assert!(!pager.more());
    }

    #[tokio::test]
    async fn undecodable_page_is_a_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{"title": "no name here"}]
            })))
            .mount(&server)
            .await;
        let client = setup_mock_client(&server).await;

        let pager: Pager<PagedList<Named>> = Pager::new(&client, "/garbled");
        let err = pager.collect_all().await.unwrap_err();
        assert!(matches!(err, ArmError::Serialization(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn missing_value_is_an_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;
        let client = setup_mock_client(&server).await;

        let pager: Pager<PagedList<Named>> = Pager::new(&client, "/empty");
        assert!(pager.collect_all().await.unwrap().is_empty());
    }
}
