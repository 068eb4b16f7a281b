//! # Product Detail
//!
//! The overlay opened from a catalog card: an image carousel plus the
//! WhatsApp contact link.
//!
//! ```text
//!   ◄ prev   [ image i of n ]   next ►        (wraps at both ends)
//!            ● ○ ○ ○                          (select_image)
//! ```

use serde::Serialize;

use crate::types::Product;

/// Base of the WhatsApp click-to-chat link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Detail overlay state for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    product: Product,
    images: Vec<String>,
    index: usize,
}

impl ProductDetail {
    /// Opens the overlay on the first image.
    ///
    /// A product without images shows `placeholder_image` alone.
    pub fn new(product: Product, placeholder_image: &str) -> Self {
        let images = match product.image_urls() {
            [] => vec![placeholder_image.to_string()],
            urls => urls.to_vec(),
        };

        ProductDetail {
            product,
            images,
            index: 0,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_image(&self) -> &str {
        &self.images[self.index]
    }

    /// Carousel controls are only shown with more than one image.
    pub fn has_multiple_images(&self) -> bool {
        self.images.len() > 1
    }

    pub fn next_image(&mut self) {
        self.index = (self.index + 1) % self.images.len();
    }

    pub fn prev_image(&mut self) {
        self.index = (self.index + self.images.len() - 1) % self.images.len();
    }

    /// Jumps to a thumbnail. Out-of-range indices are ignored.
    pub fn select_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.index = index;
        }
    }

    pub fn category_label(&self) -> &str {
        self.product.resolved_category()
    }

    pub fn description(&self) -> Option<&str> {
        self.product.description.as_deref()
    }

    /// Click-to-chat link asking about this product.
    pub fn whatsapp_link(&self, phone: &str) -> String {
        whatsapp_link(phone, &self.product.name)
    }
}

/// Builds `https://wa.me/{phone}?text=...` with the enquiry message encoded.
pub fn whatsapp_link(phone: &str, product_name: &str) -> String {
    let message = format!("Hola, estoy interesado en el producto: {}", product_name);
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        phone,
        encode_component(&message)
    )
}

/// Percent-encodes like a browser's `encodeURIComponent`, which leaves
/// `!'()*` as they are.
fn encode_component(text: &str) -> String {
    const KEPT: [(&str, &str); 5] = [
        ("%21", "!"),
        ("%27", "'"),
        ("%28", "("),
        ("%29", ")"),
        ("%2A", "*"),
    ];

    KEPT.iter()
        .fold(urlencoding::encode(text).into_owned(), |encoded, (escaped, raw)| {
            encoded.replace(escaped, raw)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLACEHOLDER_IMAGE_URL;

    fn product(images: Option<Vec<&str>>) -> Product {
        Product {
            id: 1,
            name: "Jarrón Azul".to_string(),
            description: Some("Pintado a mano".to_string()),
            images: images.map(|v| v.into_iter().map(String::from).collect()),
            category_id: None,
            category: None,
            created_at: None,
        }
    }

    #[test]
    fn test_carousel_wraps_both_ways() {
        let mut detail = ProductDetail::new(product(Some(vec!["a", "b", "c"])), PLACEHOLDER_IMAGE_URL);
        assert_eq!(detail.current_image(), "a");

        detail.prev_image();
        assert_eq!(detail.current_image(), "c");

        detail.next_image();
        detail.next_image();
        assert_eq!(detail.current_image(), "b");
        assert!(detail.has_multiple_images());
    }

    #[test]
    fn test_select_image_ignores_out_of_range() {
        let mut detail = ProductDetail::new(product(Some(vec!["a", "b"])), PLACEHOLDER_IMAGE_URL);
        detail.select_image(1);
        assert_eq!(detail.index(), 1);
        detail.select_image(7);
        assert_eq!(detail.index(), 1);
    }

    #[test]
    fn test_no_images_uses_placeholder() {
        for images in [None, Some(vec![])] {
            let mut detail = ProductDetail::new(product(images), "https://ph/x.jpg");
            assert_eq!(detail.images(), &["https://ph/x.jpg".to_string()]);
            assert!(!detail.has_multiple_images());
            detail.next_image();
            assert_eq!(detail.index(), 0);
        }
    }

    #[test]
    fn test_labels() {
        let detail = ProductDetail::new(product(None), PLACEHOLDER_IMAGE_URL);
        assert_eq!(detail.category_label(), "Varios");
        assert_eq!(detail.description(), Some("Pintado a mano"));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let detail = ProductDetail::new(product(None), PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            detail.whatsapp_link("584120183859"),
            "https://wa.me/584120183859?text=Hola%2C%20estoy%20interesado%20en%20el%20producto%3A%20Jarr%C3%B3n%20Azul"
        );
    }

    #[test]
    fn test_whatsapp_link_keeps_component_safe_punctuation() {
        assert_eq!(
            whatsapp_link("584120183859", "Taza (grande)! *nueva* d'arte"),
            "https://wa.me/584120183859?text=Hola%2C%20estoy%20interesado%20en%20el%20producto%3A%20Taza%20(grande)!%20*nueva*%20d'arte"
        );
        // A literal percent sign stays escaped
        assert!(whatsapp_link("1", "50%").ends_with("50%25"));
    }
}
