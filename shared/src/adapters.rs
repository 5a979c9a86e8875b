use crate::core::DeliveryStream;
use async_trait::async_trait;
use aws_sdk_firehose::{primitives::Blob, types::Record, Client};

#[derive(Debug)]
pub struct FirehoseDeliveryStream {
    stream_name: String,
    firehose_client: Client,
}

impl FirehoseDeliveryStream {
    pub fn new(stream_name: String, firehose_client: Client) -> Self {
        Self {
            stream_name,
            firehose_client,
        }
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }
}

#[async_trait]
impl DeliveryStream for FirehoseDeliveryStream {
    async fn put_record(&self, data: Vec<u8>) -> Result<String, String> {
        let record = Record::builder()
            .data(Blob::new(data))
            .build()
            .map_err(|e| format!("Error building record: {:?}", e))?;

        self.firehose_client
            .put_record()
            .delivery_stream_name(&self.stream_name)
            .record(record)
            .send()
            .await
            .map(|output| output.record_id().to_string())
            .map_err(|e| {
                format!(
                    "Error putting record to {}: {:?}",
                    self.stream_name,
                    e.into_service_error()
                )
            })
    }
}
