use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Number of products in the seeded catalogue.
pub const CATALOG_SIZE: u64 = 45;

const CATEGORIES: [&str; 6] = [
    "fashion",
    "beverage",
    "electronics",
    "kitchen",
    "fitness",
    "books",
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: u64,
    pub image_url: String,
    pub category: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub has_next: bool,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct CartItemPatch {
    pub quantity: u32,
}

pub type Cart = Arc<RwLock<HashMap<Uuid, CartItem>>>;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Vec<Product>>,
    cart: Cart,
}

/// Deterministic catalogue cycling through every category.
pub fn seed_catalog() -> Vec<Product> {
    (1..=CATALOG_SIZE)
        .map(|id| {
            let category = CATEGORIES[(id as usize - 1) % CATEGORIES.len()];
            Product {
                id,
                name: format!("{category} #{id}"),
                price: ((id * 7919) % 200 + 1) * 500,
                image_url: format!("https://images.example.com/products/{id}.png"),
                category: category.to_string(),
            }
        })
        .collect()
}

pub fn app() -> Router {
    app_with_catalog(seed_catalog())
}

pub fn app_with_catalog(catalog: Vec<Product>) -> Router {
    let state = AppState {
        catalog: Arc::new(catalog),
        cart: Arc::new(RwLock::new(HashMap::new())),
    };
    Router::new()
        .route("/products", get(list_products))
        .route("/cart-items", get(list_cart_items).post(add_cart_item))
        .route(
            "/cart-items/{id}",
            get(get_cart_item)
                .put(replace_cart_item)
                .patch(update_cart_item)
                .delete(remove_cart_item),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductPage>, StatusCode> {
    let page = params.page.unwrap_or(1);
    let size = params.size.unwrap_or(20);
    if page == 0 || size == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let category = match params.category.as_deref() {
        None | Some("all") => None,
        Some(c) if CATEGORIES.contains(&c) => Some(c),
        Some(_) => return Err(StatusCode::BAD_REQUEST),
    };
    let descending = match params.sort.as_deref() {
        None | Some("price,asc") => false,
        Some("price,desc") => true,
        Some(_) => return Err(StatusCode::BAD_REQUEST),
    };

    let mut matching: Vec<Product> = state
        .catalog
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .cloned()
        .collect();
    matching.sort_by_key(|p| (p.price, p.id));
    if descending {
        matching.reverse();
    }

    let start = (page as usize - 1).saturating_mul(size as usize);
    let items: Vec<Product> = matching.iter().skip(start).take(size as usize).cloned().collect();
    let has_next = start + items.len() < matching.len();
    tracing::debug!(page, size, returned = items.len(), has_next, "listed products");

    Ok(Json(ProductPage { items, has_next }))
}

async fn list_cart_items(State(state): State<AppState>) -> Json<Vec<CartItem>> {
    let cart = state.cart.read().await;
    let mut items: Vec<CartItem> = cart.values().cloned().collect();
    items.sort_by_key(|item| (item.product_id, item.id));
    Json(items)
}

fn check_item(state: &AppState, product_id: u64, quantity: u32) -> Result<(), StatusCode> {
    if quantity == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    if !state.catalog.iter().any(|p| p.id == product_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(())
}

async fn add_cart_item(
    State(state): State<AppState>,
    Json(input): Json<NewCartItem>,
) -> Result<(StatusCode, Json<CartItem>), StatusCode> {
    check_item(&state, input.product_id, input.quantity)?;
    let item = CartItem {
        id: Uuid::new_v4(),
        product_id: input.product_id,
        quantity: input.quantity,
    };
    state.cart.write().await.insert(item.id, item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CartItem>, StatusCode> {
    let cart = state.cart.read().await;
    cart.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewCartItem>,
) -> Result<Json<CartItem>, StatusCode> {
    check_item(&state, input.product_id, input.quantity)?;
    let mut cart = state.cart.write().await;
    let item = cart.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    item.product_id = input.product_id;
    item.quantity = input.quantity;
    Ok(Json(item.clone()))
}

async fn update_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CartItemPatch>,
) -> Result<Json<CartItem>, StatusCode> {
    if input.quantity == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut cart = state.cart.write().await;
    let item = cart.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    item.quantity = input.quantity;
    Ok(Json(item.clone()))
}

async fn remove_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut cart = state.cart.write().await;
    cart.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
