//! Typed wrappers over the catalog endpoints.
//!
//! No business rules here: each call builds a path, delegates to a verb on
//! [`ApiClient`] and hands back the decoded record.

use crate::api_client::ApiClient;
use crate::error::ApiResult;
use crate::paths::{encode_segment, with_query};

use models::{Brand, Category, Image, ImageMetadata, Page, Product, ProductFinder, Review};

use log::debug;

/// Page size the storefront uses for product listings.
pub const PRODUCT_PAGE_SIZE: u32 = 20;

/// Catalog operations over a borrowed [`ApiClient`].
pub struct Catalog<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog { client: self }
    }
}

impl<'a> Catalog<'a> {
    // ============================================
    // BRANDS
    // ============================================

    pub async fn brands(&self, page: u32, size: u32) -> ApiResult<Page<Brand>> {
        self.client.get_page_data(&paged("brands", page, size)).await
    }

    pub async fn brand(&self, id: i64) -> ApiResult<Brand> {
        self.client.get_data(&format!("brands/{id}")).await
    }

    pub async fn create_brand(&self, brand: &Brand) -> ApiResult<Brand> {
        self.client.post_data("brands", brand).await
    }

    pub async fn search_brands(&self, term: &str, page: u32, size: u32) -> ApiResult<Page<Brand>> {
        let (page, size) = (page.to_string(), size.to_string());
        let path = with_query(
            "brands/search",
            [("searchTerm", term), ("page", page.as_str()), ("size", size.as_str())],
        );
        self.client.get_page_data(&path).await
    }

    // ============================================
    // CATEGORIES
    // ============================================

    pub async fn categories(&self, page: u32, size: u32) -> ApiResult<Page<Category>> {
        self.client
            .get_page_data(&paged("categories", page, size))
            .await
    }

    // ============================================
    // PRODUCTS
    // ============================================

    pub async fn product(&self, uuid: &str) -> ApiResult<Product> {
        self.client
            .get_data(&format!("products/uuid/{}", encode_segment(uuid)?))
            .await
    }

    /// First page of products matching `finder`.
    pub async fn products(&self, finder: &ProductFinder) -> ApiResult<Page<Product>> {
        let path = products_path(finder)?;
        debug!("Product lookup: {path}");
        self.client.get_page_data(&path).await
    }

    // ============================================
    // REVIEWS
    // ============================================

    pub async fn reviews(&self, product_uuid: &str, page: u32, size: u32) -> ApiResult<Page<Review>> {
        let base = format!("reviews/byProduct/{}", encode_segment(product_uuid)?);
        self.client.get_page_data(&paged(&base, page, size)).await
    }

    /// Average star rating of a product. `item` is a bare number here.
    pub async fn average_rating(&self, product_uuid: &str) -> ApiResult<f64> {
        self.client
            .get_data(&format!(
                "reviews/byProduct/{}/rating",
                encode_segment(product_uuid)?
            ))
            .await
    }

    // ============================================
    // IMAGES
    // ============================================

    pub async fn image_metadata(&self, uuid: &str) -> ApiResult<ImageMetadata> {
        self.client
            .get_data(&format!("images/uuid/{}/metadata", encode_segment(uuid)?))
            .await
    }

    /// Image bytes and metadata, fetched concurrently.
    pub async fn image(&self, uuid: &str) -> ApiResult<Image> {
        let blob_path = format!("images/uuid/{}", encode_segment(uuid)?);

        let (blob, metadata) = tokio::try_join!(
            self.client.get_blob(&blob_path),
            self.image_metadata(uuid)
        )?;
        debug!("Image {uuid}: {} bytes of {}", blob.len(), blob.mime_type());

        Ok(Image { blob, metadata })
    }
}

fn paged(path: &str, page: u32, size: u32) -> String {
    let (page, size) = (page.to_string(), size.to_string());
    with_query(path, [("page", page.as_str()), ("size", size.as_str())])
}

pub(crate) fn products_path(finder: &ProductFinder) -> ApiResult<String> {
    let size = PRODUCT_PAGE_SIZE.to_string();
    let first_page = [("page", "0"), ("size", size.as_str())];

    let path = match finder {
        ProductFinder::Category(value) => with_query(
            &format!("products/category/{}", encode_segment(value)?),
            first_page,
        ),
        ProductFinder::Brand(value) => with_query(
            &format!("products/brand/{}", encode_segment(value)?),
            first_page,
        ),
        ProductFinder::Name(value) => with_query(
            "products/search",
            std::iter::once(("name", value.as_str())).chain(first_page),
        ),
    };

    Ok(path)
}
