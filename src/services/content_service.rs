//! Sample content generation for the demo.
//!
//! Output is plain template interpolation of the submitted product details;
//! the full product does the real work.

use uuid::Uuid;

use crate::{
    error::AppError,
    models::content::{ContentRequest, GeneratedContent},
};

/// Maximum number of hashtags returned, category tag included.
const MAX_HASHTAGS: usize = 15;

/// Build a sample title, description and hashtag list.
///
/// # Errors
///
/// - `InvalidRequest`: product name is blank
pub fn generate(request: &ContentRequest) -> Result<GeneratedContent, AppError> {
    let product_name = request.product_name.trim();
    if product_name.is_empty() {
        return Err(AppError::InvalidRequest(
            "Product name is required".to_string(),
        ));
    }

    let category = request.category.label();
    let keywords = request.keywords.trim();

    let title = format!("{product_name} - {category} | Quality & value");
    let description = [
        format!(
            "Discover the {product_name}, ideal for {} with features: {keywords}.",
            category.to_lowercase()
        ),
        format!(
            "Tone: {}. Designed for comfort, quality and a modern look.",
            request.tone.label()
        ),
        "Suitable for everyday use and ideal as a gift.".to_string(),
        "Technical specifications and care instructions: listed in the e-shop.".to_string(),
    ]
    .join("\n\n");

    Ok(GeneratedContent {
        id: Uuid::new_v4(),
        product_name: product_name.to_string(),
        title,
        description,
        hashtags: hashtags(category, keywords),
    })
}

/// Category tag first, then one tag per non-blank keyword.
fn hashtags(category: &str, keywords: &str) -> Vec<String> {
    std::iter::once(category)
        .chain(keywords.split(',').map(str::trim).filter(|k| !k.is_empty()))
        .map(|tag| format!("#{}", tag.replace(' ', "")))
        .take(MAX_HASHTAGS)
        .collect()
}

/// Plain-text export of generated content.
pub fn export_text(content: &GeneratedContent) -> String {
    format!(
        "Title: {}\n\nDescription:\n{}\n\nTags: {}\n",
        content.title,
        content.description,
        content.tags_line()
    )
}

/// Download file name for an export, `product_description.txt` when the
/// product name has nothing usable.
pub fn export_file_name(product_name: &str) -> String {
    let stem: String = product_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');

    if stem.is_empty() {
        "product_description.txt".to_string()
    } else {
        format!("{stem}_description.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::{Category, Tone};

    fn request(product_name: &str, keywords: &str) -> ContentRequest {
        ContentRequest {
            product_name: product_name.to_string(),
            category: Category::Shoes,
            keywords: keywords.to_string(),
            tone: Tone::Friendly,
        }
    }

    #[test]
    fn blank_product_name_is_rejected() {
        let err = generate(&request("   ", "")).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn title_and_description_interpolate_inputs() {
        let content = generate(&request(" Trail Runner ", "light, waterproof")).unwrap();

        assert_eq!(content.title, "Trail Runner - Shoes | Quality & value");
        assert!(
            content
                .description
                .starts_with("Discover the Trail Runner, ideal for shoes with features: light, waterproof.")
        );
        assert!(content.description.contains("Tone: Friendly."));
        assert_eq!(content.description.split("\n\n").count(), 4);
    }

    #[test]
    fn hashtags_start_with_category_and_drop_spaces() {
        let content = generate(&request("Boot", "all weather, , leather ")).unwrap();

        assert_eq!(content.hashtags, vec!["#Shoes", "#allweather", "#leather"]);
        assert_eq!(content.tags_line(), "#Shoes #allweather #leather");
    }

    #[test]
    fn hashtags_are_capped() {
        let keywords = (0..40).map(|i| format!("k{i}")).collect::<Vec<_>>().join(",");
        let content = generate(&request("Boot", &keywords)).unwrap();

        assert_eq!(content.hashtags.len(), MAX_HASHTAGS);
    }

    #[test]
    fn export_contains_all_sections() {
        let content = generate(&request("Boot", "leather")).unwrap();
        let text = export_text(&content);

        assert!(text.starts_with("Title: Boot - Shoes | Quality & value\n\nDescription:\n"));
        assert!(text.ends_with("Tags: #Shoes #leather\n"));
    }

    #[test]
    fn export_file_name_is_header_safe() {
        assert_eq!(export_file_name("Trail Runner"), "Trail_Runner_description.txt");
        assert_eq!(export_file_name("a\"b"), "a_b_description.txt");
        assert_eq!(export_file_name("  "), "product_description.txt");
    }
}
