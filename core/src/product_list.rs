//! Listing page controller: filters plus infinite-scroll pagination.
//!
//! # Design
//! The controller owns all listing state and is driven through `&mut self`,
//! so a second request can only start once the previous one has resolved.
//! State is committed only after a fetch succeeds; a failed fetch leaves
//! filters, page counter and products untouched and parks the error in
//! `ProductListState::error` for the page to display.

use crate::client::StorefrontClient;
use crate::error::HttpError;
use crate::observer::InfiniteScrollObserver;
use crate::types::{Category, Product, ProductPage, ProductQuery, SortType};

/// Page number of the first page of results.
pub const FIRST_PAGE: u32 = 1;

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListState {
    pub category: Category,
    pub sort_type: SortType,
    pub page: u32,
    pub has_next_page: bool,
    pub products: Vec<Product>,
    pub error: Option<HttpError>,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            category: Category::default(),
            sort_type: SortType::default(),
            page: FIRST_PAGE,
            has_next_page: true,
            products: Vec::new(),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct ProductListController {
    client: StorefrontClient,
    page_size: u32,
    state: ProductListState,
    observer: InfiniteScrollObserver,
    loaded: bool,
}

impl ProductListController {
    pub fn new(client: StorefrontClient) -> Self {
        Self::with_filters(client, Category::default(), SortType::default(), DEFAULT_PAGE_SIZE)
    }

    pub fn with_filters(
        client: StorefrontClient,
        category: Category,
        sort_type: SortType,
        page_size: u32,
    ) -> Self {
        Self {
            client,
            page_size,
            state: ProductListState {
                category,
                sort_type,
                ..ProductListState::default()
            },
            observer: InfiniteScrollObserver::new(),
            loaded: false,
        }
    }

    pub fn state(&self) -> &ProductListState {
        &self.state
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn has_next_page(&self) -> bool {
        self.state.has_next_page
    }

    pub fn error(&self) -> Option<HttpError> {
        self.state.error
    }

    /// Fetch the first page for the current filters, replacing the list.
    pub async fn load(&mut self) -> Result<(), HttpError> {
        self.reload(self.state.category, self.state.sort_type).await?;
        self.observer.reset();
        Ok(())
    }

    pub async fn change_category(&mut self, category: Category) -> Result<(), HttpError> {
        if category == self.state.category {
            return Ok(());
        }
        self.reload(category, self.state.sort_type).await?;
        self.observer.reset();
        Ok(())
    }

    pub async fn change_sort_type(&mut self, sort_type: SortType) -> Result<(), HttpError> {
        if sort_type == self.state.sort_type {
            return Ok(());
        }
        self.reload(self.state.category, sort_type).await?;
        self.observer.reset();
        Ok(())
    }

    /// Fetch the next page and append it. Returns `Ok(false)` without any
    /// request when there is no next page. Before the first page has been
    /// fetched this fetches the first page instead.
    pub async fn load_more(&mut self) -> Result<bool, HttpError> {
        if !self.state.has_next_page {
            tracing::debug!("load more ignored: no next page");
            return Ok(false);
        }
        if !self.loaded {
            self.reload(self.state.category, self.state.sort_type).await?;
            return Ok(true);
        }

        let next_page = self.state.page + 1;
        let page = self
            .fetch(self.state.category, self.state.sort_type, next_page)
            .await?;

        let has_next = page.has_next && !page.items.is_empty();
        self.state.products.extend(page.items);
        self.state.page = next_page;
        self.state.has_next_page = has_next;
        self.state.error = None;
        Ok(true)
    }

    /// Report the sentinel's visibility. Loads the next page when the
    /// sentinel has just come into view and more data exists.
    pub async fn on_sentinel_visibility(&mut self, visible: bool) -> Result<bool, HttpError> {
        if self.observer.observe(visible, self.state.has_next_page) {
            self.load_more().await
        } else {
            Ok(false)
        }
    }

    async fn reload(&mut self, category: Category, sort_type: SortType) -> Result<(), HttpError> {
        let page = self.fetch(category, sort_type, FIRST_PAGE).await?;

        self.state = ProductListState {
            category,
            sort_type,
            page: FIRST_PAGE,
            has_next_page: page.has_next && !page.items.is_empty(),
            products: page.items,
            error: None,
        };
        self.loaded = true;
        Ok(())
    }

    async fn fetch(
        &mut self,
        category: Category,
        sort_type: SortType,
        page: u32,
    ) -> Result<ProductPage, HttpError> {
        let query = ProductQuery {
            category,
            sort_type,
            page,
            size: self.page_size,
        };
        tracing::debug!(
            "fetching products: category={} sort={} page={}",
            category.as_str(),
            sort_type.as_str(),
            page
        );

        match self.client.list_products(&query).await {
            Ok(result) => {
                tracing::debug!(
                    "page {} returned {} products (has_next={})",
                    page,
                    result.items.len(),
                    result.has_next
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("failed to fetch product page {}: {}", page, e);
                self.state.error = Some(e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequest, HttpResponse, MockTransport, TransportError};
    use std::sync::Arc;

    const BASE_URL: &str = "http://shop";

    fn products(start: u64, count: u64) -> Vec<Product> {
        (start..start + count)
            .map(|id| Product {
                id,
                name: format!("Product {id}"),
                price: 1000 * id,
                image_url: format!("http://img/{id}"),
                category: Category::Kitchen,
            })
            .collect()
    }

    fn page_response(items: Vec<Product>, has_next: bool) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: serde_json::to_string(&ProductPage { items, has_next }).unwrap(),
        }
    }

    fn controller(mock: MockTransport) -> ProductListController {
        ProductListController::new(StorefrontClient::new(BASE_URL, Arc::new(mock)))
    }

    fn is_page(req: &HttpRequest, page: u32) -> bool {
        req.url.contains(&format!("page={page}&"))
    }

    #[test]
    fn initial_state() {
        let controller = controller(MockTransport::new());
        let state = controller.state();
        assert_eq!(state.page, FIRST_PAGE);
        assert!(state.has_next_page);
        assert_eq!(state.category, Category::All);
        assert_eq!(state.sort_type, SortType::PriceAsc);
        assert!(state.products.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn scroll_scenario_loads_until_last_page() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| is_page(req, 1))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(1, 20), true)) }));
        mock.expect_send()
            .withf(|req| is_page(req, 2))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(21, 5), false)) }));

        let mut controller = controller(mock);
        controller.load().await.unwrap();
        assert_eq!(controller.state().page, 1);
        assert!(controller.has_next_page());
        assert_eq!(controller.products().len(), 20);

        assert!(controller.load_more().await.unwrap());
        assert_eq!(controller.state().page, 2);
        assert!(!controller.has_next_page());
        assert_eq!(controller.products().len(), 25);
        assert_eq!(controller.products()[24].id, 25);

        // No third expectation: another request would panic the mock.
        assert!(!controller.load_more().await.unwrap());
        assert_eq!(controller.products().len(), 25);
    }

    #[tokio::test]
    async fn change_category_resets_page_with_one_fetch() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| !req.url.contains("category="))
            .times(2)
            .returning(|req| {
                let has_next = is_page(&req, 1);
                Box::pin(async move { Ok(page_response(products(1, 20), has_next)) })
            });
        mock.expect_send()
            .withf(|req| req.url.contains("category=books") && is_page(req, 1))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(100, 3), true)) }));

        let mut controller = controller(mock);
        controller.load().await.unwrap();
        controller.load_more().await.unwrap();
        assert_eq!(controller.state().page, 2);

        controller.change_category(Category::Books).await.unwrap();
        assert_eq!(controller.state().page, FIRST_PAGE);
        assert_eq!(controller.state().category, Category::Books);
        assert_eq!(controller.products().len(), 3);
        assert!(controller.has_next_page());
    }

    #[tokio::test]
    async fn change_sort_type_resets_page_with_one_fetch() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.url.contains("sort=price,asc"))
            .times(2)
            .returning(|_| Box::pin(async { Ok(page_response(products(1, 20), true)) }));
        mock.expect_send()
            .withf(|req| req.url.contains("sort=price,desc") && is_page(req, 1))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(50, 20), true)) }));

        let mut controller = controller(mock);
        controller.load().await.unwrap();
        controller.load_more().await.unwrap();

        controller.change_sort_type(SortType::PriceDesc).await.unwrap();
        assert_eq!(controller.state().page, FIRST_PAGE);
        assert_eq!(controller.state().sort_type, SortType::PriceDesc);
        assert_eq!(controller.products()[0].id, 50);
    }

    #[tokio::test]
    async fn selecting_active_filter_does_not_fetch() {
        let mock = MockTransport::new();
        let mut controller = controller(mock);
        controller.change_category(Category::All).await.unwrap();
        controller.change_sort_type(SortType::PriceAsc).await.unwrap();
        assert!(controller.products().is_empty());
    }

    #[tokio::test]
    async fn failed_load_more_keeps_state_and_records_error() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| is_page(req, 1))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(1, 20), true)) }));
        mock.expect_send()
            .withf(|req| is_page(req, 2))
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 503,
                        headers: Vec::new(),
                        body: String::new(),
                    })
                })
            });

        let mut controller = controller(mock);
        controller.load().await.unwrap();
        let before = controller.state().clone();

        let err = controller.load_more().await.unwrap_err();
        assert_eq!(err, HttpError::FetchFailed { status: 503 });
        assert_eq!(controller.error(), Some(err));
        assert_eq!(controller.state().page, before.page);
        assert_eq!(controller.products(), before.products.as_slice());
        assert!(controller.has_next_page());
    }

    #[tokio::test]
    async fn failed_filter_change_keeps_previous_filter() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| !req.url.contains("category="))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(1, 4), false)) }));
        mock.expect_send()
            .withf(|req| req.url.contains("category=fitness"))
            .times(1)
            .returning(|_| {
                Box::pin(async { Err(TransportError("connection reset".to_string())) })
            });

        let mut controller = controller(mock);
        controller.load().await.unwrap();

        let err = controller.change_category(Category::Fitness).await.unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(controller.state().category, Category::All);
        assert_eq!(controller.products().len(), 4);
        assert_eq!(controller.error(), Some(HttpError::Unexpected));
    }

    #[tokio::test]
    async fn success_clears_previous_error() {
        let mut mock = MockTransport::new();
        let mut calls = 0;
        mock.expect_send().times(2).returning(move |_| {
            calls += 1;
            let first = calls == 1;
            Box::pin(async move {
                if first {
                    Err(TransportError("offline".to_string()))
                } else {
                    Ok(page_response(products(1, 2), false))
                }
            })
        });

        let mut controller = controller(mock);
        assert!(controller.load().await.is_err());
        assert!(controller.error().is_some());
        controller.load().await.unwrap();
        assert!(controller.error().is_none());
        assert_eq!(controller.products().len(), 2);
    }

    #[tokio::test]
    async fn empty_page_ends_pagination() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(Vec::new(), true)) }));

        let mut controller = controller(mock);
        controller.load().await.unwrap();
        assert!(!controller.has_next_page());
        assert!(!controller.load_more().await.unwrap());
    }

    #[tokio::test]
    async fn sentinel_triggers_load_once_per_visibility() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| is_page(req, 1))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(1, 20), true)) }));
        mock.expect_send()
            .withf(|req| is_page(req, 2))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(21, 20), true)) }));

        let mut controller = controller(mock);
        controller.load().await.unwrap();

        assert!(controller.on_sentinel_visibility(true).await.unwrap());
        assert!(!controller.on_sentinel_visibility(true).await.unwrap());
        assert_eq!(controller.products().len(), 40);
    }

    #[tokio::test]
    async fn sentinel_before_load_fetches_first_page() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| is_page(req, 1))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(1, 20), true)) }));
        mock.expect_send()
            .withf(|req| is_page(req, 2))
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(21, 3), false)) }));

        let mut controller = controller(mock);
        assert!(controller.on_sentinel_visibility(true).await.unwrap());
        assert_eq!(controller.state().page, FIRST_PAGE);
        assert_eq!(controller.products().len(), 20);
        assert_eq!(controller.products()[0].id, 1);

        // Still visible after the first page: no second fire until it re-enters.
        assert!(!controller.on_sentinel_visibility(true).await.unwrap());
        controller.on_sentinel_visibility(false).await.unwrap();
        assert!(controller.on_sentinel_visibility(true).await.unwrap());
        assert_eq!(controller.state().page, 2);
        assert_eq!(controller.products().len(), 23);
    }

    #[tokio::test]
    async fn failed_first_load_more_retries_first_page() {
        let mut mock = MockTransport::new();
        let mut calls = 0;
        mock.expect_send()
            .withf(|req| is_page(req, 1))
            .times(2)
            .returning(move |_| {
                calls += 1;
                let first = calls == 1;
                Box::pin(async move {
                    if first {
                        Err(TransportError("offline".to_string()))
                    } else {
                        Ok(page_response(products(1, 20), true))
                    }
                })
            });

        let mut controller = controller(mock);
        assert!(controller.load_more().await.is_err());
        assert!(controller.products().is_empty());
        assert_eq!(controller.state().page, FIRST_PAGE);

        assert!(controller.load_more().await.unwrap());
        assert_eq!(controller.state().page, FIRST_PAGE);
        assert_eq!(controller.products().len(), 20);
    }

    #[tokio::test]
    async fn sentinel_ignored_without_next_page() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Box::pin(async { Ok(page_response(products(1, 5), false)) }));

        let mut controller = controller(mock);
        controller.load().await.unwrap();
        assert!(!controller.on_sentinel_visibility(true).await.unwrap());
        assert!(!controller.on_sentinel_visibility(false).await.unwrap());
        assert!(!controller.on_sentinel_visibility(true).await.unwrap());
    }
}
