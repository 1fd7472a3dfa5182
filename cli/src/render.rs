//! Plain-text rendering of the listing page.

use storefront_core::{CartItem, HttpError, Product, ProductListState, CATEGORY_OPTIONS, SORT_OPTIONS};

pub fn header(state: &ProductListState) -> String {
    let category = CATEGORY_OPTIONS
        .iter()
        .find(|option| option.value == state.category)
        .map_or(state.category.as_str(), |option| option.label);
    let sort = SORT_OPTIONS
        .iter()
        .find(|option| option.value == state.sort_type)
        .map_or(state.sort_type.as_str(), |option| option.label);
    format!("SHOP | category: {category} | sort: {sort}")
}

pub fn product_line(product: &Product) -> String {
    format!(
        "{:>4}  {:<24} {:>9}  {}",
        product.id,
        product.name,
        product.price,
        product.category.as_str()
    )
}

pub fn cart_line(item: &CartItem) -> String {
    format!("{}  product {:>4}  x{}", item.id, item.product_id, item.quantity)
}

pub fn summary(state: &ProductListState) -> String {
    let more = if state.has_next_page {
        "more available"
    } else {
        "end of list"
    };
    format!(
        "{} products, page {}, {}",
        state.products.len(),
        state.page,
        more
    )
}

pub fn error_line(err: &HttpError) -> String {
    format!("error: {} (status {})", err.message(), err.status())
}
