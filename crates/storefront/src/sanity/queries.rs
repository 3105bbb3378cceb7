//! GROQ queries.
//!
//! Values are always passed as `$` parameters, never spliced into the text.

/// One product by slug, or `null`.
///
/// Parameters: `$slug`.
pub const PRODUCT_BY_SLUG: &str = r#"*[_type == "product" && slug.current == $slug][0]{
  _id,
  name,
  "slug": slug.current,
  "imageUrl": image.asset->url,
  "categoryName": category->name,
  "categorySlug": category->slug.current,
  description,
  price,
  "dimensions": dimensions { width, height, depth },
  tags,
  features
}"#;

/// Products in the same category, excluding the one being viewed.
///
/// Parameters: `$category`, `$slug`.
pub const RELATED_PRODUCTS: &str = r#"*[_type == "product" && category->slug.current == $category && slug.current != $slug]{
  _id,
  name,
  "slug": slug.current,
  "imageUrl": image.asset->url,
  price
}"#;
