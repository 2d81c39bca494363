//! End-to-end dispatch scenarios over the two wire shapes the layer must
//! carry: a single structured record and an ordered batch of records.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use switchboard_core::{
    DecodeError, EventBody, Headers, InboundEvent, MessageKind, Payload, TypeRegistry,
};
use switchboard_dispatch::{
    DispatchContext, DispatchError, DispatchResult, Dispatcher, HandlerRegistry,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Sensor {
    id: u64,
    name: String,
    kind: i32,
}

impl Payload for Sensor {
    const KIND: MessageKind = MessageKind::new("Sensor");
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SensorReading {
    sensor_id: u64,
    ts: i64,
    value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
struct SensorBatch(Vec<SensorReading>);

impl Payload for SensorBatch {
    const KIND: MessageKind = MessageKind::new("SensorBatch");
}

const SENSOR_TOPIC: &str = "logger.sensor.instance";
const READING_TOPIC: &str = "logger.sensor.ts";

struct Fixture {
    dispatcher: Dispatcher,
    sensor_calls: Arc<AtomicUsize>,
    seen_sensor: Arc<Mutex<Option<Sensor>>>,
    batch_calls: Arc<AtomicUsize>,
    seen_batch: Arc<Mutex<Option<SensorBatch>>>,
}

fn fixture() -> Fixture {
    let mut types = TypeRegistry::new();
    types.register::<Sensor>().unwrap();
    types.register::<SensorBatch>().unwrap();
    types.seal();

    let sensor_calls = Arc::new(AtomicUsize::new(0));
    let seen_sensor = Arc::new(Mutex::new(None));
    let batch_calls = Arc::new(AtomicUsize::new(0));
    let seen_batch = Arc::new(Mutex::new(None));

    let mut handlers = HandlerRegistry::new();
    {
        let calls = Arc::clone(&sensor_calls);
        let seen = Arc::clone(&seen_sensor);
        handlers
            .register::<Sensor, _>(
                SENSOR_TOPIC,
                move |_ctx: DispatchContext, topic: String, _headers: Headers, sensor: Sensor| {
                    let calls = Arc::clone(&calls);
                    let seen = Arc::clone(&seen);
                    async move {
                        assert_eq!(topic, SENSOR_TOPIC);
                        calls.fetch_add(1, Ordering::SeqCst);
                        *seen.lock().unwrap() = Some(sensor);
                        Ok(())
                    }
                },
            )
            .unwrap();
    }
    {
        let calls = Arc::clone(&batch_calls);
        let seen = Arc::clone(&seen_batch);
        handlers
            .register::<SensorBatch, _>(
                READING_TOPIC,
                move |_ctx: DispatchContext,
                      _topic: String,
                      _headers: Headers,
                      batch: SensorBatch| {
                    let calls = Arc::clone(&calls);
                    let seen = Arc::clone(&seen);
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        *seen.lock().unwrap() = Some(batch);
                        Ok(())
                    }
                },
            )
            .unwrap();
    }
    handlers.seal();

    Fixture {
        dispatcher: Dispatcher::new(Arc::new(types), Arc::new(handlers)),
        sensor_calls,
        seen_sensor,
        batch_calls,
        seen_batch,
    }
}

#[tokio::test]
async fn single_record_scenario() {
    let fx = fixture();
    let sensor = Sensor {
        id: 42,
        name: "hall-3".into(),
        kind: 2,
    };
    let bytes = serde_json::to_vec(&sensor).unwrap();

    let event = InboundEvent::raw(SENSOR_TOPIC, Sensor::KIND, bytes)
        .with_headers(Headers::new().with("trace-id", "abc"));
    fx.dispatcher
        .dispatch(&DispatchContext::new(), event)
        .await
        .unwrap();

    assert_eq!(fx.sensor_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fx.seen_sensor.lock().unwrap().take(), Some(sensor));
}

#[tokio::test]
async fn batch_scenario_preserves_record_order() {
    let fx = fixture();
    let batch = SensorBatch(vec![
        SensorReading {
            sensor_id: 1,
            ts: 100,
            value: 20.5,
        },
        SensorReading {
            sensor_id: 1,
            ts: 101,
            value: 21.25,
        },
        SensorReading {
            sensor_id: 2,
            ts: 100,
            value: 19.0,
        },
    ]);
    let bytes = serde_json::to_vec(&batch).unwrap();

    let event = InboundEvent::raw(READING_TOPIC, SensorBatch::KIND, bytes);
    fx.dispatcher
        .dispatch(&DispatchContext::new(), event)
        .await
        .unwrap();

    assert_eq!(fx.batch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fx.seen_batch.lock().unwrap().take(), Some(batch));
}

#[tokio::test]
async fn typed_body_skips_the_codec() {
    let fx = fixture();
    let sensor = Sensor {
        id: 7,
        name: "flow".into(),
        kind: 1,
    };

    let event = InboundEvent::typed(SENSOR_TOPIC, Box::new(sensor.clone()));
    fx.dispatcher
        .dispatch(&DispatchContext::new(), event)
        .await
        .unwrap();

    assert_eq!(fx.seen_sensor.lock().unwrap().take(), Some(sensor));
}

#[tokio::test]
async fn batch_body_against_single_record_binding_is_a_type_mismatch() {
    let fx = fixture();

    // Subscription established for Sensor, but the broker layer materialized
    // a batch. The handler must never run and nothing may be coerced.
    let event = InboundEvent {
        topic: SENSOR_TOPIC.to_string(),
        kind: Sensor::KIND,
        headers: Headers::new(),
        body: EventBody::Typed(Box::new(SensorBatch(vec![SensorReading::default()]))),
        delivery: Default::default(),
    };

    let err = fx
        .dispatcher
        .dispatch(&DispatchContext::new(), event)
        .await
        .unwrap_err();

    match err {
        DispatchError::PayloadTypeMismatch { expected, observed } => {
            assert_eq!(expected, Sensor::KIND);
            assert_eq!(observed, SensorBatch::KIND);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fx.sensor_calls.load(Ordering::SeqCst), 0);
    assert_eq!(fx.batch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unbound_topic_returns_handler_not_found() {
    let fx = fixture();
    let event = InboundEvent::raw("topic.unknown", Sensor::KIND, b"{}".to_vec());

    let err = fx
        .dispatcher
        .dispatch(&DispatchContext::new(), event)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::HandlerNotFound { topic, kind }
            if topic == "topic.unknown" && kind == Sensor::KIND
    ));
    assert_eq!(fx.sensor_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_payload_carries_diagnostics() {
    let fx = fixture();
    let raw = b"[{\"sensor_id\": }]".to_vec();
    let len = raw.len();

    let err = fx
        .dispatcher
        .dispatch(
            &DispatchContext::new(),
            InboundEvent::raw(READING_TOPIC, SensorBatch::KIND, raw),
        )
        .await
        .unwrap_err();

    match err {
        DispatchError::Decode(DecodeError::Malformed {
            kind,
            len: observed,
            ..
        }) => {
            assert_eq!(kind, SensorBatch::KIND);
            assert_eq!(observed, len);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fx.batch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn handler_failure_is_propagated_unchanged() {
    let mut types = TypeRegistry::new();
    types.register::<Sensor>().unwrap();
    types.seal();

    let mut handlers = HandlerRegistry::new();
    handlers
        .register::<Sensor, _>(
            SENSOR_TOPIC,
            |_ctx: DispatchContext, _topic: String, _headers: Headers, _sensor: Sensor| async {
                Err(DispatchError::handler(std::io::Error::other(
                    "downstream store unavailable",
                )))
            },
        )
        .unwrap();
    handlers.seal();

    let dispatcher = Dispatcher::new(Arc::new(types), Arc::new(handlers));
    let err = dispatcher
        .dispatch(
            &DispatchContext::new(),
            InboundEvent::raw(SENSOR_TOPIC, Sensor::KIND, b"{}".to_vec()),
        )
        .await
        .unwrap_err();

    match err {
        DispatchError::Handler(source) => {
            assert_eq!(source.to_string(), "downstream store unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn handler_observing_cancellation_fails_fast() {
    let mut types = TypeRegistry::new();
    types.register::<Sensor>().unwrap();
    types.seal();

    let mut handlers = HandlerRegistry::new();
    handlers
        .register::<Sensor, _>(
            SENSOR_TOPIC,
            |ctx: DispatchContext, _topic: String, _headers: Headers, _sensor: Sensor| async move {
                // A well-behaved handler checks its scope before slow work.
                if ctx.is_cancelled() {
                    return Err(DispatchError::Cancelled);
                }
                // Cancellation arrives mid-flight.
                ctx.cancelled().await;
                Err(DispatchError::Cancelled)
            },
        )
        .unwrap();
    handlers.seal();

    let dispatcher = Dispatcher::new(Arc::new(types), Arc::new(handlers));
    let ctx = DispatchContext::new();
    let cancel = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        cancel.cancel();
    });

    let result: DispatchResult<()> = dispatcher
        .dispatch(
            &ctx,
            InboundEvent::raw(SENSOR_TOPIC, Sensor::KIND, b"{}".to_vec()),
        )
        .await;
    assert!(matches!(result, Err(DispatchError::Cancelled)));
}

#[tokio::test]
async fn concurrent_dispatches_across_topics() {
    let fx = fixture();
    let dispatcher = fx.dispatcher.clone();

    let sensor_bytes = serde_json::to_vec(&Sensor::default()).unwrap();
    let batch_bytes = serde_json::to_vec(&SensorBatch(vec![SensorReading::default()])).unwrap();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let d = dispatcher.clone();
        let bytes = sensor_bytes.clone();
        tasks.push(tokio::spawn(async move {
            d.dispatch(
                &DispatchContext::new(),
                InboundEvent::raw(SENSOR_TOPIC, Sensor::KIND, bytes),
            )
            .await
        }));
        let d = dispatcher.clone();
        let bytes = batch_bytes.clone();
        tasks.push(tokio::spawn(async move {
            d.dispatch(
                &DispatchContext::new(),
                InboundEvent::raw(READING_TOPIC, SensorBatch::KIND, bytes),
            )
            .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(fx.sensor_calls.load(Ordering::SeqCst), 8);
    assert_eq!(fx.batch_calls.load(Ordering::SeqCst), 8);
}
