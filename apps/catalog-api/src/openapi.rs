//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog: listing with filters and pagination, creation, and popularity rankings",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;
