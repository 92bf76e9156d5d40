//! Catalog Example
//!
//! Loads a fixture set, runs a catalog query, prints one page of results and
//! the resulting cart.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s`, `-c`, `--min`, `--max`, `--sort` and `--desc` to shape the query
//! Use `-a 1,2,2` to fill the cart and `--promo` to apply a promotion code
//! Set `RUST_LOG=boutique=debug` to see store events

use std::io;

use anyhow::Result;
use clap::Parser;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use boutique::{
    config::StorefrontConfig,
    fixtures::Fixture,
    pagination::{PageLink, page_window},
    products::Product,
    receipt::Receipt,
    store::{Store, StoreChange, StoreObserver, StoreSnapshot},
    utils::ExampleCatalogArgs,
};

/// Logs badge counts whenever the store changes.
#[derive(Debug)]
struct BadgeLogger;

impl StoreObserver for BadgeLogger {
    fn on_change(&mut self, change: StoreChange, snapshot: &StoreSnapshot) {
        info!(
            ?change,
            cart = snapshot.cart_count,
            favorites = snapshot.favorites_count,
            total = ?snapshot.total_minor,
            "store changed"
        );
    }
}

fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boutique=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}

fn product_table(products: &[&Product<'_>]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Title", "Category", "Price", "Rating"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            product.category.name.clone(),
            format!("{}", product.price),
            product
                .rating
                .map(|rating| format!("{} ({})", rating.average, rating.count))
                .unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    table.to_string()
}

fn page_strip(current: usize, total: usize) -> String {
    page_window(current, total)
        .into_iter()
        .map(|link| match link {
            PageLink::Page(number) if number == current => format!("[{number}]"),
            PageLink::Page(number) => number.to_string(),
            PageLink::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Catalog Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleCatalogArgs::parse();

    init_logging()?;

    let config = match args.config.as_deref() {
        Some(path) => StorefrontConfig::from_path(path)?,
        None => StorefrontConfig::default(),
    };

    let fixture = Fixture::from_set(&args.fixture)?;
    let catalog = fixture.catalog();
    let paginator = config.paginator()?;

    let results = catalog.query(&args.query_params()?);
    let page = paginator.page(&results, args.page(&paginator, results.len()));

    println!("{}", product_table(page.items));
    println!(
        "Page {} of {} ({} products)  {}",
        page.number,
        page.total_pages.max(1),
        page.total_items,
        page_strip(page.number, page.total_pages)
    );

    if let Some(first) = page.items.first() {
        let related: Vec<&str> = catalog
            .related(first.id, config.related_limit)
            .into_iter()
            .map(|product| product.title.as_str())
            .collect();

        println!("Related to {}: {}", first.title, related.join(", "));
    }

    let mut store = Store::new(fixture.currency()?, config.promotion_catalog()?);

    store.subscribe(Box::new(BadgeLogger));

    for id in args.cart_items(fixture.cart_items()) {
        match catalog.get(id) {
            Some(product) => {
                store.add_to_cart(product)?;
            }
            None => println!("No product with id {id}"),
        }
    }

    if let Some(code) = args.promo.as_deref()
        && let Err(err) = store.apply_promotion(code)
    {
        println!("Promotion rejected: {err}");
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::from_cart(store.cart())?.write_to(&mut handle)?;

    Ok(())
}
