//! Storefront
//!
//! Terminal client for the catalog API: browse the listing interactively,
//! or run one-shot listing, creation and ranking commands.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_cli_tracing, install_color_eyre};
use domain_products::client::DEFAULT_API_URL;
use domain_products::{
    CatalogApi, CategorizedProducts, CreateProduct, HttpCatalogClient, ListingQuery, Product,
    ProductCategory, ProductFilter, SortOrder,
};
use eyre::Result;
use tracing::info;

mod browse;
mod views;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse and add products in the catalog")]
struct Cli {
    /// Catalog API base URL
    #[arg(long, env = "CATALOG_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive listing with filters and pagination (default)
    Browse,

    /// Print one page of products
    List {
        /// most_viewed, most_popular or most_reviewed
        #[arg(short, long)]
        category: Option<ProductCategory>,

        /// Inclusive price ceiling
        #[arg(short, long)]
        max_price: Option<f64>,

        /// asc or desc on creation time
        #[arg(short, long, default_value = "desc")]
        sort: SortOrder,

        #[arg(short, long, default_value_t = 1)]
        page: u64,

        #[arg(short, long, default_value_t = 10)]
        limit: u64,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Add a product
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        price: f64,

        #[arg(short, long, default_value = "most_viewed")]
        category: ProductCategory,
    },

    /// Show the top products per ranking
    Top {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_cli_tracing("warn");

    let cli = Cli::parse();
    let api = HttpCatalogClient::new(&cli.api_url);
    info!("Using catalog API at {}", api.base_url());

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            browse::run(&api, stdin, &mut std::io::stdout()).await?;
        }

        Commands::List {
            category,
            max_price,
            sort,
            page,
            limit,
            json,
        } => {
            let query = ListingQuery {
                filter: ProductFilter {
                    category,
                    max_price,
                },
                sort,
                page,
                limit,
            };
            let result = api.list_products(query).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for product in &result.products {
                    println!("{}", describe(product));
                }
                println!("Page {} of {}", page, result.total_pages);
            }
        }

        Commands::Add {
            name,
            price,
            category,
        } => {
            let product = api
                .create_product(CreateProduct {
                    name,
                    price,
                    category,
                })
                .await?;
            println!("Added {}", describe(&product));
        }

        Commands::Top { json } => {
            let summary = api.categorized().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
    }

    Ok(())
}

fn describe(product: &Product) -> String {
    format!(
        "{:<32} ${:>10.2}  {:<13} views {:>5}  reviews {:>5}",
        product.name, product.price, product.category, product.views, product.reviews
    )
}

fn print_summary(summary: &CategorizedProducts) {
    let sections = [
        ("Most viewed", &summary.most_viewed),
        ("Most popular", &summary.most_popular),
        ("Most reviewed", &summary.most_reviewed),
    ];

    for (title, products) in sections {
        println!("{}:", title);
        if products.is_empty() {
            println!("  (none)");
        }
        for product in products {
            println!("  {}", describe(product));
        }
    }
}
