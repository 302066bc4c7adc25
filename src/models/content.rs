//! Product content models for the demo generator.
//!
//! This module defines:
//! - `ContentRequest`: the product details submitted by a demo user
//! - `GeneratedContent`: the sample title, description and hashtags returned

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product category offered by the generator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Clothing,
    Shoes,
    Cosmetics,
    Electronics,
    Books,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Clothing,
        Category::Shoes,
        Category::Cosmetics,
        Category::Electronics,
        Category::Books,
        Category::Other,
    ];

    /// Human-readable label, also used for the category hashtag.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Shoes => "Shoes",
            Category::Cosmetics => "Cosmetics",
            Category::Electronics => "Electronics",
            Category::Books => "Books",
            Category::Other => "Other",
        }
    }

    /// Form value (matches the serde name).
    pub fn value(&self) -> &'static str {
        match self {
            Category::Clothing => "clothing",
            Category::Shoes => "shoes",
            Category::Cosmetics => "cosmetics",
            Category::Electronics => "electronics",
            Category::Books => "books",
            Category::Other => "other",
        }
    }
}

/// Writing tone of the generated description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Short,
    Descriptive,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Friendly, Tone::Short, Tone::Descriptive];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Short => "Short/Original",
            Tone::Descriptive => "Descriptive/Detailed",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Short => "short",
            Tone::Descriptive => "descriptive",
        }
    }
}

/// Request body for content generation.
///
/// # JSON Example
///
/// ```json
/// {
///   "product_name": "Linen Shirt",
///   "category": "clothing",
///   "keywords": "cotton, durable, formal",
///   "tone": "friendly"
/// }
/// ```
///
/// # Validation
///
/// - `product_name`: Required, must not be blank
/// - `category`: Optional, defaults to `clothing`
/// - `keywords`: Optional comma-separated list
/// - `tone`: Optional, defaults to `professional`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    pub product_name: String,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub keywords: String,

    #[serde(default)]
    pub tone: Tone,
}

/// Generated sample content for one product.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "product_name": "Linen Shirt",
///   "title": "Linen Shirt - Clothing | Quality & value",
///   "description": "Discover the Linen Shirt, ...",
///   "hashtags": ["#Clothing", "#cotton", "#durable"]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContent {
    /// Identifier of this generated sample
    pub id: Uuid,

    pub product_name: String,

    pub title: String,

    /// Paragraphs separated by blank lines
    pub description: String,

    /// Category tag first, then one tag per keyword
    pub hashtags: Vec<String>,
}

impl GeneratedContent {
    /// Hashtags as a single space-separated line.
    pub fn tags_line(&self) -> String {
        self.hashtags.join(" ")
    }
}
