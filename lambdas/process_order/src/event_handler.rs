use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use shared::core::{DeliveryStream, Detail, OrderError, OrderEvent, OrderRecord};

pub(crate) struct HandlerDeps<D: DeliveryStream> {
    pub delivery_stream: D,
}

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct Acknowledgement {
    pub status: &'static str,
}

impl Acknowledgement {
    fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Outcome of one pass over the candidates: how many records were delivered
/// before the first failure, if there was one.
#[derive(Debug, Default)]
pub(crate) struct ProcessingSummary {
    pub submitted: usize,
    pub failure: Option<OrderError>,
}

pub(crate) async fn function_handler<D: DeliveryStream>(
    deps: &HandlerDeps<D>,
    event: LambdaEvent<OrderEvent>,
) -> Result<Acknowledgement, Error> {
    let (payload, context) = event.into_parts();
    tracing::info!("Received event: {}", serde_json::to_string(&payload)?);

    let candidates = Detail::from(payload.detail).into_candidates();
    let summary = process_candidates(&deps.delivery_stream, candidates, &context.request_id).await;

    match summary.failure {
        None => {
            tracing::info!("Forwarded {} order record(s)", summary.submitted);
            Ok(Acknowledgement::ok())
        }
        Some(e) => {
            tracing::error!(
                "Invalid event ({}), {} record(s) already forwarded: {}",
                e.kind(),
                summary.submitted,
                e
            );
            Err(e.into())
        }
    }
}

async fn process_candidates<D: DeliveryStream>(
    delivery_stream: &D,
    candidates: Vec<Value>,
    request_id: &str,
) -> ProcessingSummary {
    let mut summary = ProcessingSummary::default();

    for (index, candidate) in candidates.into_iter().enumerate() {
        match process_candidate(delivery_stream, index, candidate, request_id).await {
            Ok(record_id) => {
                tracing::debug!("Delivered record {} as {}", index, record_id);
                summary.submitted += 1;
            }
            Err(e) => {
                // NOTE: records delivered before this one are not rolled back
                summary.failure = Some(e);
                break;
            }
        }
    }

    summary
}

async fn process_candidate<D: DeliveryStream>(
    delivery_stream: &D,
    index: usize,
    candidate: Value,
    request_id: &str,
) -> Result<String, OrderError> {
    let mut record = OrderRecord::parse(index, candidate)?;
    if let Err(e) = record.validate(index) {
        tracing::error!("Invalid event, missing orderId in record {}", index);
        return Err(e);
    }
    record.enrich(request_id);

    let data = record
        .to_delivery_record()
        .map_err(|source| OrderError::Serialization { index, source })?;

    delivery_stream
        .put_record(data)
        .await
        .map_err(|message| OrderError::Delivery { index, message })
}
