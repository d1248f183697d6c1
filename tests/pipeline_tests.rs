//! Integration tests for the remote delivery pipeline
//!
//! These tests verify:
//! - Records reach the transport in enqueue order
//! - Backpressure at the queue capacity
//! - Shutdown drains everything and closes the queue for good
//! - Local threshold filtering is independent of remote forwarding

mod common;

use common::{CaptureSink, GateTransport, RecordingTransport};
use crossbeam_channel::{bounded, unbounded};
use relay_logger::prelude::*;
use relay_logger::{info, DEFAULT_QUEUE_CAPACITY};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn remote_logger(threshold: Severity) -> (Logger, CaptureSink, RecordingTransport) {
    let sink = CaptureSink::default();
    let transport = RecordingTransport::default();
    let logger = Logger::builder()
        .prefix("pipeline")
        .threshold(threshold)
        .local_sink(sink.clone())
        .transport(transport.clone())
        .build()
        .expect("Failed to build logger");
    (logger, sink, transport)
}

#[test]
fn test_records_delivered_in_enqueue_order() {
    let (logger, _sink, transport) = remote_logger(Severity::Debug);

    for i in 0..200 {
        info!(logger, "message {}", i);
    }
    logger.shutdown();

    let expected: Vec<String> = (0..200).map(|i| format!("message {}", i)).collect();
    assert_eq!(transport.messages(), expected);
    assert_eq!(logger.metrics().delivered(), 200);
}

#[test]
fn test_concurrent_producers_keep_per_thread_order() {
    let (logger, _sink, transport) = remote_logger(Severity::Debug);
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..4)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    info!(logger, "{}:{}", thread_id, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer panicked");
    }
    logger.shutdown();

    let messages = transport.messages();
    assert_eq!(messages.len(), 200);
    for thread_id in 0..4 {
        let seen: Vec<u32> = messages
            .iter()
            .filter_map(|m| m.split_once(':'))
            .filter(|(t, _)| t.parse::<u32>() == Ok(thread_id))
            .map(|(_, i)| i.parse().unwrap())
            .collect();
        assert_eq!(seen, (0..50).collect::<Vec<u32>>());
    }
}

#[test]
fn test_backpressure_at_capacity() {
    let inner = RecordingTransport::default();
    let (entered_tx, entered_rx) = unbounded();
    let (permit_tx, permit_rx) = unbounded();
    let logger = Logger::builder()
        .local_sink(CaptureSink::default())
        .transport(GateTransport {
            inner: inner.clone(),
            entered: entered_tx,
            permits: permit_rx,
        })
        .build()
        .expect("Failed to build logger");
    let logger = Arc::new(logger);

    // The sender takes the first record and parks inside the transport.
    logger.info("in flight");
    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("sender never reached the transport");

    // A full queue's worth of records goes in without blocking.
    let started = Instant::now();
    for i in 0..DEFAULT_QUEUE_CAPACITY {
        logger.info(format!("queued {}", i));
    }
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(logger.pending(), DEFAULT_QUEUE_CAPACITY);

    // One more has to wait for a slot.
    let finished = Arc::new(AtomicBool::new(false));
    let (done_tx, done_rx) = bounded(1);
    let producer = {
        let logger = Arc::clone(&logger);
        let finished = Arc::clone(&finished);
        thread::spawn(move || {
            logger.info("overflow");
            finished.store(true, Ordering::SeqCst);
            let _ = done_tx.send(());
        })
    };

    thread::sleep(Duration::from_millis(200));
    assert!(!finished.load(Ordering::SeqCst), "enqueue past capacity did not block");

    // Completing the in-flight delivery frees a slot.
    permit_tx.send(()).unwrap();
    done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("blocked producer was never released");
    producer.join().unwrap();
    assert!(logger.metrics().block_events() >= 1);

    for _ in 0..(DEFAULT_QUEUE_CAPACITY + 1) {
        permit_tx.send(()).unwrap();
    }
    logger.shutdown();

    let messages = inner.messages();
    assert_eq!(messages.len(), DEFAULT_QUEUE_CAPACITY + 2);
    assert_eq!(messages.first().map(String::as_str), Some("in flight"));
    assert_eq!(messages.last().map(String::as_str), Some("overflow"));
}

#[test]
fn test_shutdown_drains_and_closes_queue() {
    let (logger, sink, transport) = remote_logger(Severity::Debug);

    for i in 0..25 {
        logger.notice(format!("before {}", i));
    }
    logger.shutdown();

    assert_eq!(transport.bodies().len(), 25);
    assert!(!logger.is_remote_enabled());
    assert_eq!(logger.pending(), 0);

    // Still logged locally, never forwarded.
    logger.notice("after shutdown");
    thread::sleep(Duration::from_millis(50));
    assert_eq!(transport.bodies().len(), 25);
    assert_eq!(sink.entries().len(), 26);
    assert_eq!(logger.metrics().enqueued(), 25);
}

#[test]
fn test_info_below_warning_threshold_is_forwarded_only() {
    let (logger, sink, transport) = remote_logger(Severity::Warning);

    logger.info("quiet locally");
    assert!(sink.entries().is_empty());

    logger.err("loud everywhere");
    logger.shutdown();

    let local = sink.entries();
    assert_eq!(local.len(), 1);
    assert_eq!(local[0].level, Severity::Error);

    let bodies = transport.bodies();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["level"], 6);
    assert_eq!(bodies[0]["message"], "quiet locally");
    assert_eq!(bodies[1]["level"], 3);
    assert_eq!(bodies[1]["prefix"], "[pipeline]");
}

#[test]
fn test_every_severity_forwarded_regardless_of_threshold() {
    let (logger, sink, transport) = remote_logger(Severity::Emergency);

    logger.debug("d");
    logger.info("i");
    logger.notice("n");
    logger.warning("w");
    logger.err("e");
    logger.critical("c");
    logger.alert("a");
    logger.emergency("em");
    logger.shutdown();

    assert_eq!(sink.entries().len(), 1);
    let levels: Vec<u64> = transport
        .bodies()
        .iter()
        .map(|b| b["level"].as_u64().unwrap())
        .collect();
    assert_eq!(levels, vec![7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn test_remote_disabled_is_local_only() {
    let sink = CaptureSink::default();
    let logger = Logger::builder()
        .endpoint("")
        .prefix("solo")
        .threshold(Severity::Notice)
        .local_sink(sink.clone())
        .build()
        .expect("Failed to build logger");

    assert!(!logger.is_remote_enabled());
    logger.debug("filtered");
    logger.warning("kept");
    logger.report_error("solo.Run", &std::io::Error::other("boom"));

    let started = Instant::now();
    logger.shutdown();
    assert!(started.elapsed() < Duration::from_millis(100));

    let local = sink.entries();
    assert_eq!(local.len(), 2);
    assert_eq!(local[0].message, "kept");
    assert!(local[1].message.ends_with(":solo.Run:boom"));
    assert_eq!(logger.metrics().enqueued(), 0);
}

#[test]
fn test_shutdown_timeout_reports_stalled_sender() {
    let inner = RecordingTransport::default();
    let (entered_tx, entered_rx) = unbounded();
    let (permit_tx, permit_rx) = unbounded();
    let logger = Logger::builder()
        .local_sink(CaptureSink::default())
        .transport(GateTransport {
            inner: inner.clone(),
            entered: entered_tx,
            permits: permit_rx,
        })
        .build()
        .expect("Failed to build logger");

    logger.info("stuck");
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    assert!(!logger.shutdown_timeout(Duration::from_millis(50)));
    assert!(!logger.is_remote_enabled());

    permit_tx.send(()).unwrap();
    assert!(logger.shutdown_timeout(Duration::from_secs(5)));
    assert_eq!(inner.messages(), vec!["stuck".to_string()]);
}

#[test]
fn test_shutdown_timeout_with_producer_blocked_on_full_queue() {
    let inner = RecordingTransport::default();
    let (entered_tx, entered_rx) = unbounded();
    let (permit_tx, permit_rx) = unbounded();
    let logger = Logger::builder()
        .local_sink(CaptureSink::default())
        .transport(GateTransport {
            inner: inner.clone(),
            entered: entered_tx,
            permits: permit_rx,
        })
        .build()
        .expect("Failed to build logger");
    let logger = Arc::new(logger);

    logger.info("in flight");
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    for i in 0..DEFAULT_QUEUE_CAPACITY {
        logger.info(format!("queued {}", i));
    }

    let producer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || logger.info("blocked"))
    };
    thread::sleep(Duration::from_millis(100));

    // The deadline holds even though a producer is parked in send().
    let (result_tx, result_rx) = bounded(1);
    let closer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            let _ = result_tx.send(logger.shutdown_timeout(Duration::from_millis(100)));
        })
    };
    let drained = result_rx
        .recv_timeout(Duration::from_secs(3))
        .expect("shutdown_timeout ignored its deadline");
    assert!(!drained);
    closer.join().unwrap();

    // Logging and introspection are not held up by the pending shutdown.
    assert!(!logger.is_remote_enabled());
    assert_eq!(logger.pending(), 0);
    logger.info("local only");

    for _ in 0..(DEFAULT_QUEUE_CAPACITY + 2) {
        permit_tx.send(()).unwrap();
    }
    producer.join().unwrap();
    assert!(logger.shutdown_timeout(Duration::from_secs(5)));

    let messages = inner.messages();
    assert_eq!(messages.len(), DEFAULT_QUEUE_CAPACITY + 2);
    assert_eq!(messages.last().map(String::as_str), Some("blocked"));
}
