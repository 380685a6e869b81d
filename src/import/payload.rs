// productimporter/src/import/payload.rs
use crate::platform::{
    ImageRef, NewProduct, NewVariant, ProductOption, ProductUpdate, VariantUpdate,
};
use crate::source::{Price, ProductRecord};

/// Option axes declared on every created product, in this order.
pub const OPTION_NAMES: [&str; 2] = ["Color", "Memory"];

/// Payload for a product that does not exist remotely yet. Color and memory
/// become the variant's `option1`/`option2` and are declared as product options.
pub fn build_new_product(record: &ProductRecord) -> NewProduct {
    let color = record.attributes.color.clone();
    let memory = record.attributes.memory.clone();

    NewProduct {
        title: record.name.clone(),
        body_html: record.description.clone(),
        variants: vec![NewVariant {
            sku: record.sku.clone(),
            inventory_quantity: record.stock,
            option1: color.clone(),
            option2: memory.clone(),
            price: Price::wire_or_default(record.price.as_ref()),
        }],
        options: vec![
            ProductOption {
                name: OPTION_NAMES[0].to_string(),
                values: vec![color],
            },
            ProductOption {
                name: OPTION_NAMES[1].to_string(),
                values: vec![memory],
            },
        ],
    }
}

/// Payload for an existing product. Option values are left as they were at
/// creation; only title, body, stock, price and optionally the image change.
pub fn build_product_update(
    product_id: u64,
    record: &ProductRecord,
    image_id: Option<u64>,
) -> ProductUpdate {
    ProductUpdate {
        id: product_id,
        title: record.name.clone(),
        body_html: record.description.clone(),
        variants: vec![VariantUpdate {
            sku: record.sku.clone(),
            inventory_quantity: record.stock,
            price: Price::wire_or_default(record.price.as_ref()),
        }],
        images: image_id.map(|id| vec![ImageRef { id }]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::types::ProductEnvelope;
    use crate::source::Attributes;
    use serde_json::json;

    fn record() -> anyhow::Result<ProductRecord> {
        Ok(ProductRecord {
            sku: "A1".to_string(),
            name: Some("Widget".to_string()),
            description: Some("<p>Useful</p>".to_string()),
            stock: 3,
            price: Some("19.5".parse()?),
            image: Some("photo.jpg".to_string()),
            attributes: Attributes {
                color: Some("Black".to_string()),
                memory: None,
            },
        })
    }

    #[test]
    fn test_create_payload_shape() -> anyhow::Result<()> {
        let payload = serde_json::to_value(ProductEnvelope {
            product: build_new_product(&record()?),
        })?;

        assert_eq!(
            payload,
            json!({
                "product": {
                    "title": "Widget",
                    "body_html": "<p>Useful</p>",
                    "variants": [{
                        "sku": "A1",
                        "inventory_quantity": 3,
                        "option1": "Black",
                        "option2": null,
                        "price": "19.50"
                    }],
                    "options": [
                        { "name": "Color", "values": ["Black"] },
                        { "name": "Memory", "values": [null] }
                    ]
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_update_payload_never_carries_options() -> anyhow::Result<()> {
        let payload = serde_json::to_value(build_product_update(42, &record()?, None))?;

        assert_eq!(
            payload,
            json!({
                "id": 42,
                "title": "Widget",
                "body_html": "<p>Useful</p>",
                "variants": [{ "sku": "A1", "inventory_quantity": 3, "price": "19.50" }]
            })
        );
        assert!(payload.get("options").is_none());
        assert!(payload["variants"][0].get("option1").is_none());
        assert!(payload["variants"][0].get("option2").is_none());
        Ok(())
    }

    #[test]
    fn test_update_payload_attaches_known_image() -> anyhow::Result<()> {
        let payload = serde_json::to_value(build_product_update(42, &record()?, Some(7)))?;
        assert_eq!(payload["images"], json!([{ "id": 7 }]));
        Ok(())
    }

    #[test]
    fn test_absent_price_goes_out_as_zero() -> anyhow::Result<()> {
        let mut record = record()?;
        record.price = None;

        assert_eq!(build_new_product(&record).variants[0].price, "0.00");
        assert_eq!(build_product_update(1, &record, None).variants[0].price, "0.00");
        Ok(())
    }
}
