//! Typed client for the storefront API.
//!
//! # Design
//! `StorefrontClient` holds only a `base_url` and a `Fetcher`; it carries no
//! mutable state between calls. URL construction is split into pure
//! `*_url` methods so it can be tested without a transport.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::HttpError;
use crate::fetcher::{FetchOptions, Fetcher};
use crate::http::{ReqwestTransport, Transport};
use crate::types::{CartItem, CartItemPatch, Category, NewCartItem, ProductPage, ProductQuery};

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    base_url: String,
    fetcher: Fetcher,
}

impl StorefrontClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher: Fetcher::new(transport),
        }
    }

    /// Client over a fresh `reqwest` transport.
    pub fn with_reqwest(base_url: &str) -> Self {
        Self::new(base_url, Arc::new(ReqwestTransport::new()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn products_url(&self, query: &ProductQuery) -> String {
        let mut url = format!(
            "{}/products?page={}&size={}",
            self.base_url, query.page, query.size
        );
        if query.category != Category::All {
            url.push_str("&category=");
            url.push_str(query.category.as_str());
        }
        url.push_str("&sort=");
        url.push_str(query.sort_type.as_str());
        url
    }

    pub fn cart_items_url(&self) -> String {
        format!("{}/cart-items", self.base_url)
    }

    pub fn cart_item_url(&self, id: Uuid) -> String {
        format!("{}/cart-items/{id}", self.base_url)
    }

    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, HttpError> {
        self.fetcher
            .get(&self.products_url(query), FetchOptions::new())
            .await
    }

    pub async fn list_cart_items(&self) -> Result<Vec<CartItem>, HttpError> {
        self.fetcher
            .get(&self.cart_items_url(), FetchOptions::new())
            .await
    }

    pub async fn add_cart_item(&self, item: &NewCartItem) -> Result<(), HttpError> {
        self.fetcher
            .post(&self.cart_items_url(), FetchOptions::json(item)?)
            .await
    }

    pub async fn replace_cart_item(&self, id: Uuid, item: &NewCartItem) -> Result<(), HttpError> {
        self.fetcher
            .put(&self.cart_item_url(id), FetchOptions::json(item)?)
            .await
    }

    pub async fn update_cart_item(&self, id: Uuid, patch: &CartItemPatch) -> Result<(), HttpError> {
        self.fetcher
            .patch(&self.cart_item_url(id), FetchOptions::json(patch)?)
            .await
    }

    pub async fn remove_cart_item(&self, id: Uuid) -> Result<(), HttpError> {
        self.fetcher
            .delete(&self.cart_item_url(id), FetchOptions::new())
            .await
    }
}
