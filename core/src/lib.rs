//! Client core for the storefront product listing.
//!
//! # Overview
//! A request helper (`Fetcher`) that folds every HTTP outcome into a
//! two-kind `HttpError`, a typed `StorefrontClient` over it, and the
//! `ProductListController` that drives category/sort filtering and
//! infinite-scroll pagination.
//!
//! # Design
//! - The network sits behind the `Transport` trait; `ReqwestTransport` is
//!   the production implementation and tests substitute a mock.
//! - `Fetcher` and `StorefrontClient` are stateless apart from the shared
//!   transport and `base_url`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod observer;
pub mod product_list;
pub mod types;

pub use client::StorefrontClient;
pub use config::{load_config, Config, ConfigError};
pub use error::HttpError;
pub use fetcher::{FetchOptions, Fetcher};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
pub use observer::InfiniteScrollObserver;
pub use product_list::{ProductListController, ProductListState, FIRST_PAGE};
pub use types::{
    CartItem, CartItemPatch, Category, FilterOption, NewCartItem, Product, ProductPage,
    ProductQuery, SortType, CATEGORY_OPTIONS, SORT_OPTIONS,
};
