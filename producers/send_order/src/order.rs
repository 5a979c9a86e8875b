use aws_sdk_eventbridge::primitives::{DateTime, DateTimeFormat};
use aws_sdk_eventbridge::types::PutEventsRequestEntry;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) const ORDER_SOURCE: &str = "com.myapp.orders";
pub(crate) const ORDER_CREATED: &str = "OrderCreated";

#[derive(Debug, Serialize)]
pub(crate) struct OrderItem {
    pub sku: String,
    pub qty: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SampleOrder {
    pub order_id: String,
    pub customer_id: String,
    pub amount: f64,
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub created_at: String,
}

impl SampleOrder {
    pub fn new(now: SystemTime) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let millis = now
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();

        Ok(Self {
            order_id: format!("order-{}", millis),
            customer_id: "cust-123".to_string(),
            amount: 199.99,
            currency: "USD".to_string(),
            items: vec![OrderItem {
                sku: "ABC".to_string(),
                qty: 1,
            }],
            created_at: iso_timestamp(now)?,
        })
    }

    pub fn to_entry(&self, event_bus_name: &str) -> Result<PutEventsRequestEntry, serde_json::Error> {
        Ok(PutEventsRequestEntry::builder()
            .source(ORDER_SOURCE)
            .detail_type(ORDER_CREATED)
            .detail(serde_json::to_string(self)?)
            .event_bus_name(event_bus_name)
            .build())
    }
}

/// RFC 3339 in UTC with exactly three fractional digits, e.g. `2023-11-14T22:13:20.000Z`.
fn iso_timestamp(now: SystemTime) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let now = DateTime::from(now);
    let seconds = DateTime::from_secs(now.secs()).fmt(DateTimeFormat::DateTime)?;
    let millis = now.subsec_nanos() / 1_000_000;
    Ok(format!("{}.{:03}Z", seconds.trim_end_matches('Z'), millis))
}

#[cfg(test)]
mod tests {
    use super::{iso_timestamp, SampleOrder, ORDER_CREATED, ORDER_SOURCE};
    use serde_json::json;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn when_created_should_derive_order_id_and_timestamp_from_clock() {
        let now = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);

        let order = SampleOrder::new(now).unwrap();

        assert_eq!(order.order_id, "order-1700000000123");
        assert_eq!(order.created_at, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn when_clock_is_on_whole_second_should_still_write_milliseconds() {
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);

        assert_eq!(iso_timestamp(now).unwrap(), "2023-11-14T22:13:20.000Z");
        assert_eq!(
            iso_timestamp(UNIX_EPOCH + Duration::from_micros(1_500)).unwrap(),
            "1970-01-01T00:00:00.001Z"
        );
    }

    #[test]
    fn when_serialized_should_use_camel_case_fields() {
        let order = SampleOrder::new(UNIX_EPOCH + Duration::from_secs(1)).unwrap();

        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["orderId"], json!("order-1000"));
        assert_eq!(value["customerId"], json!("cust-123"));
        assert_eq!(value["amount"], json!(199.99));
        assert_eq!(value["currency"], json!("USD"));
        assert_eq!(value["items"], json!([{"sku": "ABC", "qty": 1}]));
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn when_converted_to_entry_should_target_event_bus() {
        let order = SampleOrder::new(UNIX_EPOCH).unwrap();

        let entry = order.to_entry("orders-bus").unwrap();

        assert_eq!(entry.source(), Some(ORDER_SOURCE));
        assert_eq!(entry.detail_type(), Some(ORDER_CREATED));
        assert_eq!(entry.event_bus_name(), Some("orders-bus"));
        let detail: serde_json::Value = serde_json::from_str(entry.detail().unwrap()).unwrap();
        assert_eq!(detail["orderId"], json!("order-0"));
    }
}
