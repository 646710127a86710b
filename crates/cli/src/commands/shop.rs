//! Commands that talk to a running storefront.
//!
//! # Usage
//!
//! ```bash
//! bazaar health
//! bazaar products --city Kabul --category Grocery
//! bazaar --api-url http://127.0.0.1:3000 shop
//! ```
//!
//! `shop` is an interactive session over the same flow as the web page:
//! filter, fill a cart, check out, add products and register customers.
//! Type `help` inside the session for the command list.

#![allow(clippy::print_stdout)]

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use bazaar_client::{ApiClient, ShopController, ShopState};
use bazaar_core::{
    BranchId, CreateProductRequest, Price, Product, ProductFilter, ProductId,
    RegisterCustomerRequest,
};

const HELP: &str = "\
Commands:
  products                       show the current product list
  city <name|all>                filter by city
  branch <id|all>                filter by branch
  category <name|all>            filter by category
  reset                          clear all filters
  branches | cities | categories show the loaded lists
  add <product-id>               add a product to the cart
  qty <product-id> <n>           set a cart quantity (0 removes)
  remove <product-id>            remove a product from the cart
  cart                           show the cart
  checkout <email>               place the order
  sell <price> <branch-id> <city> <category> <name...>
                                 add a product to the catalog
  register <email> <name...>     register a customer
  help                           show this help
  quit                           leave the shop";

/// A parsed shop session command.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopCommand {
    Products,
    City(String),
    Branch(String),
    Category(String),
    Reset,
    Branches,
    Cities,
    Categories,
    Add(ProductId),
    Quantity(ProductId, i64),
    Remove(ProductId),
    Cart,
    Checkout(String),
    Sell(CreateProductRequest),
    Register(RegisterCustomerRequest),
    Help,
    Quit,
}

/// Errors for a shop session line that cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command '{0}', type 'help'")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

impl ShopCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for an unknown command or missing arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, InputError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();
        let text = rest.join(" ");

        let parsed = match command.to_ascii_lowercase().as_str() {
            "products" | "ls" => Self::Products,
            "city" => Self::City(text),
            "branch" => Self::Branch(text),
            "category" => Self::Category(text),
            "reset" => Self::Reset,
            "branches" => Self::Branches,
            "cities" => Self::Cities,
            "categories" => Self::Categories,
            "add" => Self::Add(product_id(rest.first(), "add <product-id>")?),
            "qty" => {
                const USAGE: &str = "qty <product-id> <n>";
                let id = product_id(rest.first(), USAGE)?;
                let quantity = number(rest.get(1), USAGE)?;
                Self::Quantity(id, quantity)
            }
            "remove" | "rm" => Self::Remove(product_id(rest.first(), "remove <product-id>")?),
            "cart" => Self::Cart,
            "checkout" => Self::Checkout(text),
            "sell" => Self::Sell(sell_request(&rest)?),
            "register" => {
                let (email, name) = rest
                    .split_first()
                    .ok_or(InputError::Usage("register <email> <name...>"))?;
                Self::Register(RegisterCustomerRequest {
                    name: Some(name.join(" ")),
                    email: Some((*email).to_string()),
                    ..Default::default()
                })
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(InputError::UnknownCommand(other.to_string())),
        };
        Ok(Some(parsed))
    }
}

fn number(word: Option<&&str>, usage: &'static str) -> Result<i64, InputError> {
    let word = word.ok_or(InputError::Usage(usage))?;
    word.parse()
        .map_err(|_| InputError::NotANumber((*word).to_string()))
}

fn product_id(word: Option<&&str>, usage: &'static str) -> Result<ProductId, InputError> {
    number(word, usage).map(ProductId::new)
}

fn sell_request(rest: &[&str]) -> Result<CreateProductRequest, InputError> {
    const USAGE: &str = "sell <price> <branch-id> <city> <category> <name...>";
    let [price, branch, city, category, name @ ..] = rest else {
        return Err(InputError::Usage(USAGE));
    };
    if name.is_empty() {
        return Err(InputError::Usage(USAGE));
    }
    let price =
        Price::parse(price).map_err(|_| InputError::NotANumber((*price).to_string()))?;
    let branch = number(Some(branch), USAGE)?;
    Ok(CreateProductRequest::new(
        name.join(" "),
        price,
        *category,
        *city,
        BranchId::new(branch),
    ))
}

/// Print the storefront liveness status.
///
/// # Errors
///
/// Returns an error if the storefront is unreachable.
pub async fn health(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let health = api.health().await?;
    println!("{}: {}", health.status, health.message);
    Ok(())
}

/// Print the catalog, optionally filtered.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn products(
    api: &ApiClient,
    filter: &ProductFilter,
) -> Result<(), Box<dyn std::error::Error>> {
    let products = api.products(filter).await?;
    print_products(&products);
    Ok(())
}

/// Run the interactive shop session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if standard input cannot be read.
pub async fn run(api: ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = ShopController::new(api);
    shop.start().await;

    println!("Bazaar at {}. Type 'help' for commands.", shop.api().base_url());
    print_products(&shop.state().products);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match ShopCommand::parse(&line) {
            Ok(None) => {}
            Ok(Some(ShopCommand::Quit)) => break,
            Ok(Some(command)) => execute(&mut shop, command).await,
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

async fn execute(shop: &mut ShopController, command: ShopCommand) {
    match command {
        ShopCommand::Products => print_products(&shop.state().products),
        ShopCommand::City(city) => {
            shop.select_city(&city).await;
            print_products(&shop.state().products);
        }
        ShopCommand::Branch(branch) => {
            shop.select_branch(&branch).await;
            print_products(&shop.state().products);
        }
        ShopCommand::Category(category) => {
            shop.select_category(&category).await;
            print_products(&shop.state().products);
        }
        ShopCommand::Reset => {
            shop.reset().await;
            print_products(&shop.state().products);
        }
        ShopCommand::Branches => {
            for branch in &shop.state().branches {
                println!("  [{}] {} ({}) - {}", branch.id, branch.name, branch.city, branch.address);
            }
        }
        ShopCommand::Cities => println!("  {}", shop.state().cities.join(", ")),
        ShopCommand::Categories => println!("  {}", shop.state().categories.join(", ")),
        ShopCommand::Add(id) => match shop.add_to_cart(id) {
            Some(notice) => println!("{notice}"),
            None => println!("No product {id} in the current list"),
        },
        ShopCommand::Quantity(id, quantity) => {
            if let Some(notice) = shop.change_quantity(id, quantity) {
                println!("{notice}");
            }
            print_cart(shop.state());
        }
        ShopCommand::Remove(id) => {
            if let Some(notice) = shop.remove_from_cart(id) {
                println!("{notice}");
            }
        }
        ShopCommand::Cart => print_cart(shop.state()),
        ShopCommand::Checkout(email) => match shop.checkout(&email) {
            Ok(confirmation) => println!("{}", confirmation.message()),
            Err(e) => println!("{e}"),
        },
        ShopCommand::Sell(request) => println!("{}", shop.add_product(&request).await),
        ShopCommand::Register(request) => println!("{}", shop.register_customer(&request).await),
        ShopCommand::Help => println!("{HELP}"),
        ShopCommand::Quit => {}
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found for your selection.");
        return;
    }
    for product in products {
        let mut details = format!(
            "Category: {}, Location: {}",
            product.category.as_deref().unwrap_or("N/A"),
            product.location.as_deref().unwrap_or("N/A"),
        );
        if let Some(branch) = &product.branch_name {
            details.push_str(", Branch: ");
            details.push_str(branch);
        }
        println!("  [{}] {} - ${}  ({details})", product.id, product.name, product.price);
    }
}

fn print_cart(state: &ShopState) {
    if state.cart.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for line in state.cart.lines() {
        println!(
            "  [{}] {} ${} x {}",
            line.product_id, line.name, line.price, line.quantity
        );
    }
    println!(
        "  Total: ${} ({} items)",
        state.cart.formatted_total(),
        state.cart.item_count()
    );
}
