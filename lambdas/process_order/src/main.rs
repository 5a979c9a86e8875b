use crate::config::Config;
use crate::event_handler::{function_handler, HandlerDeps};
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::adapters::FirehoseDeliveryStream;

mod config;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = Config::load()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let firehose_client = aws_sdk_firehose::Client::new(&aws_config);

    let delivery_stream = FirehoseDeliveryStream::new(config.firehose_name, firehose_client);
    tracing::info!(
        "Forwarding orders to delivery stream {}",
        delivery_stream.stream_name()
    );
    let handler_deps = HandlerDeps { delivery_stream };

    run(service_fn(|event| function_handler(&handler_deps, event))).await
}
