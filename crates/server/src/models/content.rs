//! Content domain types backing the public site and the admin CRUD screens.
//!
//! These mirror the CMS tables: articles, products, home-page blocks,
//! contact submissions, and site settings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use registra_core::{
    ArticleId, ContactMessageId, FeatureId, HeroContentId, ProductFeatureId, ProductId, Slug,
    TestimonialId,
};

/// A blog article.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub slug: Slug,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author_name: Option<String>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A point-of-sale product offering.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: Slug,
    pub name: String,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    /// Free-form display price ("$49/mo", "on request").
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub demo_link: Option<String>,
    pub download_link: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A selling point listed on a product's detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductFeature {
    pub id: ProductFeatureId,
    pub product_id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_index: i32,
}

/// The home-page hero block.
#[derive(Debug, Clone, Serialize)]
pub struct HeroContent {
    pub id: HeroContentId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// A home-page feature card.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub id: FeatureId,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub order_index: i32,
}

/// A customer testimonial.
#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    /// 1-5 star rating, when provided.
    pub rating: Option<i32>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_index: i32,
}

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
