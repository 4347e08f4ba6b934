//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use cloudfns_core::items::ITEM_KEY;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// DynamoDB caps batch writes at 25 requests.
const BATCH_SIZE: usize = 25;

/// Attempts per batch before giving up on unprocessed items.
const MAX_BATCH_ATTEMPTS: u32 = 5;

/// A demo item written by the seed command.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedItem {
    pub id: String,
    pub name: String,
    pub category: &'static str,
    pub price: f64,
    pub tags: Vec<&'static str>,
    pub in_stock: bool,
}

/// Generate `count` demo items with fresh ids.
pub fn generate_seed_items(count: u32) -> Vec<SeedItem> {
    let names = [
        "Widget", "Gadget", "Gizmo", "Doohickey", "Sprocket", "Flange", "Bracket", "Valve",
    ];
    let categories = ["hardware", "tools", "parts", "accessories"];
    let tag_pool = ["new", "sale", "popular", "limited"];

    (0..count)
        .map(|i| {
            let i = i as usize;
            SeedItem {
                id: Uuid::new_v4().to_string(),
                name: format!("{} {}", names[i % names.len()], i + 1),
                category: categories[i % categories.len()],
                price: ((i % 20) as f64) * 2.5 + 4.99,
                tags: tag_pool
                    .iter()
                    .copied()
                    .skip(i % tag_pool.len())
                    .take(1 + i % 2)
                    .collect(),
                in_stock: i % 4 != 3,
            }
        })
        .collect()
}

/// Convert a seed item to the attribute layout the server reads back.
pub fn seed_item_to_attributes(item: &SeedItem) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ITEM_KEY.to_string(), AttributeValue::S(item.id.clone())),
        ("name".to_string(), AttributeValue::S(item.name.clone())),
        (
            "category".to_string(),
            AttributeValue::S(item.category.to_string()),
        ),
        ("price".to_string(), AttributeValue::N(item.price.to_string())),
        (
            "tags".to_string(),
            AttributeValue::L(
                item.tags
                    .iter()
                    .map(|t| AttributeValue::S(t.to_string()))
                    .collect(),
            ),
        ),
        ("inStock".to_string(), AttributeValue::Bool(item.in_stock)),
    ])
}

/// Insert items into DynamoDB, retrying unprocessed writes with backoff.
///
/// Returns how many items were written; writes still unprocessed after the
/// last attempt are not counted.
pub async fn seed_items(client: &Client, table_name: &str, items: &[SeedItem]) -> Result<u32> {
    let mut inserted = 0;

    for chunk in items.chunks(BATCH_SIZE) {
        let mut pending = chunk
            .iter()
            .map(|item| {
                let put = PutRequest::builder()
                    .set_item(Some(seed_item_to_attributes(item)))
                    .build()
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        for attempt in 0..MAX_BATCH_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(backoff(attempt)).await;
            }

            let sent = pending.len();
            let output = client
                .batch_write_item()
                .request_items(table_name, pending)
                .send()
                .await
                .map_err(|e| DynamodbError::AwsSdk(DisplayErrorContext(&e).to_string()))?;

            pending = unprocessed_for(output.unprocessed_items(), table_name);
            inserted += sent.saturating_sub(pending.len()) as u32;

            if pending.is_empty() {
                break;
            }
        }
    }

    Ok(inserted)
}

/// Writes DynamoDB handed back for `table_name`.
fn unprocessed_for(
    unprocessed: Option<&HashMap<String, Vec<WriteRequest>>>,
    table_name: &str,
) -> Vec<WriteRequest> {
    unprocessed
        .and_then(|tables| tables.get(table_name))
        .cloned()
        .unwrap_or_default()
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(100 * 2u64.pow(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_count_with_unique_ids() {
        let items = generate_seed_items(30);
        assert_eq!(items.len(), 30);

        let mut ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_generates_nothing_for_zero() {
        assert!(generate_seed_items(0).is_empty());
    }

    #[test]
    fn test_attributes_carry_item_key() {
        let item = &generate_seed_items(1)[0];
        let attributes = seed_item_to_attributes(item);

        assert_eq!(
            attributes.get("ItemId"),
            Some(&AttributeValue::S(item.id.clone()))
        );
        assert_eq!(
            attributes.get("name"),
            Some(&AttributeValue::S("Widget 1".to_string()))
        );
        assert_eq!(
            attributes.get("price"),
            Some(&AttributeValue::N("4.99".to_string()))
        );
        assert_eq!(attributes.get("inStock"), Some(&AttributeValue::Bool(true)));
    }

    fn write_request(id: &str) -> WriteRequest {
        let put = PutRequest::builder()
            .item(ITEM_KEY, AttributeValue::S(id.to_string()))
            .build()
            .unwrap();
        WriteRequest::builder().put_request(put).build()
    }

    #[test]
    fn test_unprocessed_for_picks_table_requests() {
        let tables = HashMap::from([
            ("ItemsTable".to_string(), vec![write_request("a"), write_request("b")]),
            ("Other".to_string(), vec![write_request("c")]),
        ]);

        assert_eq!(unprocessed_for(Some(&tables), "ItemsTable").len(), 2);
        assert!(unprocessed_for(Some(&tables), "Missing").is_empty());
        assert!(unprocessed_for(None, "ItemsTable").is_empty());
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(4), Duration::from_millis(1600));
    }

    #[test]
    fn test_tags_are_never_empty() {
        for item in generate_seed_items(8) {
            assert!(!item.tags.is_empty());
        }
    }
}
