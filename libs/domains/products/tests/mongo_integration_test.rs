//! MongoDB integration tests for `MongoProductRepository`
//!
//! These start a MongoDB container through testcontainers and are ignored by
//! default. Run them with `cargo test -p domain_products -- --ignored`.

use chrono::{Duration, TimeZone, Utc};
use domain_products::*;
use test_utils::assertions::assert_price_eq;
use test_utils::{TestDataBuilder, TestMongo};

fn product(
    builder: &TestDataBuilder,
    index: u64,
    category: ProductCategory,
    views: i64,
    reviews: i64,
) -> Product {
    let mut product = Product::new(CreateProduct {
        name: builder.name("product", &index.to_string()),
        price: builder.price(index),
        category,
    });
    product.views = views;
    product.reviews = reviews;
    product.created_at =
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::seconds(index as i64);
    product
}

async fn repository(mongo: &TestMongo, builder: &TestDataBuilder) -> MongoProductRepository {
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_read_back_through_listing() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_insert_read_back");
    let repo = repository(&mongo, &builder).await;
    let service = ProductService::new(repo);

    let created = service
        .create_product(CreateProduct {
            name: builder.name("product", "lamp"),
            price: 19.99,
            category: ProductCategory::MostPopular,
        })
        .await
        .unwrap();

    let page = service.list_products(ListingQuery::default()).await.unwrap();

    assert_eq!(page.total_pages, 1);
    assert_eq!(page.products, vec![created.clone()]);
    assert_price_eq(page.products[0].price, 19.99, "stored price");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_listing_filters_sorts_and_pages_in_the_store() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_listing");
    let repo = repository(&mongo, &builder).await;

    let products: Vec<Product> = (0..12)
        .map(|i| product(&builder, i, ProductCategory::ALL[(i % 3) as usize], 0, 0))
        .collect();
    for p in &products {
        repo.insert(p.clone()).await.unwrap();
    }

    let filter = ProductFilter {
        category: Some(ProductCategory::MostViewed),
        max_price: None,
    };
    let expected: Vec<&Product> = products.iter().rev().filter(|p| filter.matches(p)).collect();

    let first = repo
        .find_page(ListingQuery {
            filter,
            sort: SortOrder::Desc,
            page: 1,
            limit: 3,
        })
        .await
        .unwrap();
    let second = repo
        .find_page(ListingQuery {
            filter,
            sort: SortOrder::Desc,
            page: 2,
            limit: 3,
        })
        .await
        .unwrap();

    assert_eq!(repo.count(filter).await.unwrap(), 4);
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 1);

    let listed: Vec<&Product> = first.iter().chain(second.iter()).collect();
    assert_eq!(listed, expected);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_max_price_is_inclusive_in_the_store() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_max_price");
    let repo = repository(&mongo, &builder).await;

    for (i, price) in [10.0, 20.0, 30.0].into_iter().enumerate() {
        let mut p = product(&builder, i as u64, ProductCategory::MostViewed, 0, 0);
        p.price = price;
        repo.insert(p).await.unwrap();
    }

    let filter = ProductFilter {
        category: None,
        max_price: Some(20.0),
    };
    assert_eq!(repo.count(filter).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_page_with_skip_beyond_i64_is_empty() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_huge_skip");
    let repo = repository(&mongo, &builder).await;

    repo.insert(product(&builder, 0, ProductCategory::MostViewed, 0, 0))
        .await
        .unwrap();

    let products = repo
        .find_page(ListingQuery {
            page: 1_000_000_000_000_000_000,
            limit: 10,
            ..ListingQuery::default()
        })
        .await
        .unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_top_by_ranks_descending_with_newest_first_on_ties() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_top_by");
    let repo = repository(&mongo, &builder).await;

    let tied_old = product(&builder, 1, ProductCategory::MostViewed, 50, 1);
    let tied_new = product(&builder, 2, ProductCategory::MostViewed, 50, 7);
    let low = product(&builder, 3, ProductCategory::MostViewed, 5, 3);
    for p in [&tied_old, &tied_new, &low] {
        repo.insert(p.clone()).await.unwrap();
    }

    let by_views = repo.top_by(RankingMetric::Views, 2).await.unwrap();
    assert_eq!(by_views, vec![tied_new.clone(), tied_old.clone()]);

    let by_reviews = repo.top_by(RankingMetric::Reviews, 2).await.unwrap();
    assert_eq!(by_reviews, vec![tied_new, low]);
}
