use crate::config::{Config, DEFAULT_REGION};
use crate::order::SampleOrder;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use std::time::SystemTime;

mod config;
mod order;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::load()?;
    let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;
    let client = aws_sdk_eventbridge::Client::new(&aws_config);

    let order = SampleOrder::new(SystemTime::now())?;
    let entry = order.to_entry(&config.event_bus)?;

    let response = client.put_events().entries(entry).send().await;

    match response {
        Ok(output) => {
            println!("PutEvents result for {}:", order.order_id);
            for entry in output.entries() {
                if let Some(event_id) = entry.event_id() {
                    println!("Event ID: {}", event_id);
                } else {
                    println!("Event failed to be recorded: {:?}", entry.error_message());
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Request failed: {:?}", e);
            Err(e.into())
        }
    }
}
