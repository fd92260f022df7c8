//! `HttpCatalogClient` against a live router on an ephemeral port.

use axum::Router;
use domain_products::*;
use tokio::net::TcpListener;

async fn spawn_api() -> HttpCatalogClient {
    let service = ProductService::new(InMemoryProductRepository::new());
    let app = Router::new().nest("/products", handlers::router(service));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpCatalogClient::new(format!("http://{}", addr))
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let client = spawn_api().await;

    for (name, price) in [("Lamp", 25.0), ("Desk", 150.0), ("Chair", 60.0)] {
        client
            .create_product(CreateProduct {
                name: name.to_string(),
                price,
                category: ProductCategory::MostViewed,
            })
            .await
            .unwrap();
    }

    let page = client
        .list_products(ListingQuery {
            filter: ProductFilter {
                category: Some(ProductCategory::MostViewed),
                max_price: Some(100.0),
            },
            sort: SortOrder::Desc,
            page: 1,
            limit: 10,
        })
        .await
        .unwrap();

    let names: Vec<_> = page.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Chair", "Lamp"]);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_categorized_through_client() {
    let client = spawn_api().await;

    client
        .create_product(CreateProduct {
            name: "Lamp".to_string(),
            price: 25.0,
            category: ProductCategory::MostPopular,
        })
        .await
        .unwrap();

    let summary = client.categorized().await.unwrap();
    assert_eq!(summary.most_viewed.len(), 1);
    assert_eq!(summary.most_popular.len(), 1);
    assert_eq!(summary.most_reviewed.len(), 1);
}

#[tokio::test]
async fn test_api_errors_surface_status_and_message() {
    let client = spawn_api().await;

    let result = client
        .list_products(ListingQuery {
            page: 0,
            ..ListingQuery::default()
        })
        .await;

    match result {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("page"), "{message}");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_a_transport_error() {
    let client = HttpCatalogClient::new("http://127.0.0.1:1");

    let result = client.categorized().await;
    assert!(matches!(result, Err(ClientError::Transport(_))));
}
