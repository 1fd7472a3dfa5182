//! Storefront CLI
//!
//! Terminal host for the product listing: renders the list, feeds sentinel
//! visibility to the controller to scroll through pages, and manages the cart.

mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::{
    load_config, CartItemPatch, Category, Config, NewCartItem, ProductListController, SortType,
    StorefrontClient,
};
use tracing::Level;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the storefront catalogue and manage the cart")]
#[command(version)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API base URL (overrides config file and STOREFRONT_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List products, scrolling through additional pages
    Products {
        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        sort: Option<SortType>,

        /// How many times the end of the list scrolls into view
        #[arg(long, default_value_t = 0)]
        pages: u32,
    },

    /// Manage cart items
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    List,
    /// Add a product to the cart
    Add {
        product_id: u64,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change the quantity of a cart item
    Set { id: Uuid, quantity: u32 },
    /// Point a cart item at another product
    Replace {
        id: Uuid,
        product_id: u64,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a cart item
    Remove { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = if let Some(path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", path);
        load_config(path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };
    config.apply_env();
    if let Some(base_url) = args.base_url {
        config.api_base_url = base_url;
    }
    config.validate()?;
    let client = StorefrontClient::with_reqwest(&config.api_base_url);
    tracing::info!("Using API at {}", client.base_url());

    match args.command {
        Command::Products {
            category,
            sort,
            pages,
        } => {
            let controller = ProductListController::with_filters(
                client,
                category.unwrap_or(config.category),
                sort.unwrap_or(config.sort_type),
                config.page_size,
            );
            browse(controller, pages).await
        }
        Command::Cart { action } => cart(&client, action).await,
    }
}

async fn browse(
    mut controller: ProductListController,
    pages: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render::header(controller.state()));

    if let Err(e) = controller.load().await {
        println!("{}", render::error_line(&e));
        return Err(e.into());
    }
    let mut printed = print_new(&controller, 0);

    for _ in 0..pages {
        if !controller.has_next_page() {
            break;
        }
        // Scroll away and back so the sentinel re-enters the viewport.
        controller.on_sentinel_visibility(false).await?;
        match controller.on_sentinel_visibility(true).await {
            Ok(_) => printed = print_new(&controller, printed),
            Err(e) => {
                println!("{}", render::error_line(&e));
                break;
            }
        }
    }

    println!("{}", render::summary(controller.state()));
    Ok(())
}

fn print_new(controller: &ProductListController, already_printed: usize) -> usize {
    for product in &controller.products()[already_printed..] {
        println!("{}", render::product_line(product));
    }
    controller.products().len()
}

async fn cart(client: &StorefrontClient, action: CartAction) -> Result<(), Box<dyn std::error::Error>> {
    let result = match action {
        CartAction::List => client.list_cart_items().await.map(|items| {
            if items.is_empty() {
                println!("cart is empty");
            }
            for item in &items {
                println!("{}", render::cart_line(item));
            }
        }),
        CartAction::Add {
            product_id,
            quantity,
        } => client
            .add_cart_item(&NewCartItem {
                product_id,
                quantity,
            })
            .await
            .map(|()| println!("added product {product_id} x{quantity}")),
        CartAction::Set { id, quantity } => client
            .update_cart_item(id, &CartItemPatch { quantity })
            .await
            .map(|()| println!("updated {id} to x{quantity}")),
        CartAction::Replace {
            id,
            product_id,
            quantity,
        } => client
            .replace_cart_item(
                id,
                &NewCartItem {
                    product_id,
                    quantity,
                },
            )
            .await
            .map(|()| println!("replaced {id} with product {product_id} x{quantity}")),
        CartAction::Remove { id } => client
            .remove_cart_item(id)
            .await
            .map(|()| println!("removed {id}")),
    };

    if let Err(e) = &result {
        tracing::warn!("cart request failed: {}", e);
        if e.is_not_found() {
            println!("no such cart item or product");
        }
        println!("{}", render::error_line(e));
    }
    Ok(result?)
}
