//! 可续传传输器测试：断线续传、恰好一次交付、长度校验、连接失败策略、取消与钩子。
//!
//! 全部基于 [`ScriptedTransport`]，不依赖网络。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::fetcher::FetchError;
use crate::sink::{ByteSink, MemorySink, WriterSink};
use crate::streamer::{ConnectFailurePolicy, HookAbort, ResumableStreamer, StreamError, StreamHook};
use crate::tests::{ScriptedTransport, Step, resource, scripted_fetcher};

const URL: &str = "https://media.example.com/track.webm";

fn streamer(transport: &Arc<ScriptedTransport>) -> ResumableStreamer {
    ResumableStreamer::new(scripted_fetcher(transport))
}

fn no_delay_retry(max_retries: u32) -> ConnectFailurePolicy {
    ConnectFailurePolicy::Retry {
        max_retries,
        retry_delay_ms: 0,
    }
}

#[tokio::test]
async fn resumes_after_drop_at_sixty_of_hundred() {
    let data = resource(100);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::cut(60, 100), Step::full(100)]);
    let mut sink = MemorySink::new();

    let result = streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(sink.data(), &data[..]);
    assert_eq!(sink.finalize_count(), 1);
    assert_eq!(transport.requests(), vec![0, 60]);
    assert_eq!(result.bytes_written, 100);
    assert_eq!(result.declared_length, Some(100));
    assert_eq!(result.attempts, 2);
}

#[tokio::test]
async fn random_drop_offsets_deliver_every_byte_exactly_once() {
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let len: u64 = rng.gen_range(1..600);
        let data = resource(len as usize);

        let mut cuts: Vec<u64> = (0..rng.gen_range(0..8)).map(|_| rng.gen_range(0..len)).collect();
        cuts.sort_unstable();
        let steps = cuts.iter().map(|&c| Step::cut(c, len)).collect();

        let chunk_size = rng.gen_range(1..64);
        let transport = ScriptedTransport::with_chunk_size(data.clone(), steps, chunk_size);
        let mut sink = MemorySink::new();

        let result = streamer(&transport).stream(URL, &mut sink).await.unwrap();

        assert_eq!(sink.data(), &data[..], "cuts = {:?}", cuts);
        assert_eq!(sink.finalize_count(), 1);
        assert_eq!(result.bytes_written, len);

        let requests = transport.requests();
        assert_eq!(requests[0], 0);
        assert!(requests.windows(2).all(|w| w[0] <= w[1]), "requests = {:?}", requests);
        assert_eq!(requests.len(), cuts.len() + 1);
    }
}

#[tokio::test]
async fn body_error_mid_stream_is_treated_as_end_of_stream() {
    let data = resource(80);
    let transport = ScriptedTransport::new(
        data.clone(),
        vec![Step::Deliver {
            cut_at: Some(33),
            declared: Some(80),
            body_error: true,
        }],
    );
    let mut sink = MemorySink::new();

    streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(sink.data(), &data[..]);
    assert_eq!(transport.requests(), vec![0, 33]);
}

#[tokio::test]
async fn disconnect_after_every_byte_does_not_recurse() {
    let data = resource(2000);
    let steps = (1..2000).map(|c| Step::cut(c, 2000)).collect();
    let transport = ScriptedTransport::with_chunk_size(data.clone(), steps, 1);
    let mut sink = MemorySink::new();

    let result = streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(sink.data(), &data[..]);
    assert_eq!(result.attempts, 2000);
    assert_eq!(transport.requests(), (0..2000).collect::<Vec<u64>>());
}

#[tokio::test]
async fn zero_length_resource_completes_without_retry() {
    let transport = ScriptedTransport::new(resource(0), vec![]);
    let mut sink = MemorySink::new();

    let result = streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(result.bytes_written, 0);
    assert_eq!(result.declared_length, Some(0));
    assert!(sink.data().is_empty());
    assert_eq!(sink.finalize_count(), 1);
    assert_eq!(transport.requests(), vec![0]);
}

#[tokio::test]
async fn changed_declared_length_fails_without_finalizing() {
    let data = resource(120);
    let transport = ScriptedTransport::new(
        data.clone(),
        vec![
            Step::cut(40, 100),
            Step::Deliver {
                cut_at: None,
                declared: Some(120),
                body_error: false,
            },
        ],
    );
    let mut sink = MemorySink::new();

    let err = streamer(&transport).stream(URL, &mut sink).await.unwrap_err();

    assert!(matches!(
        err,
        StreamError::LengthMismatch {
            expected: 100,
            actual: 120
        }
    ));
    assert!(!sink.is_finalized());
    assert_eq!(sink.data(), &data[..40]);
}

#[tokio::test]
async fn unknown_length_completes_on_first_end_of_stream() {
    let data = resource(100);
    let transport = ScriptedTransport::new(
        data.clone(),
        vec![Step::Deliver {
            cut_at: Some(25),
            declared: None,
            body_error: false,
        }],
    );
    let mut sink = MemorySink::new();

    let result = streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(result.bytes_written, 25);
    assert_eq!(result.declared_length, None);
    assert_eq!(sink.data(), &data[..25]);
    assert_eq!(sink.finalize_count(), 1);
    assert_eq!(transport.requests(), vec![0]);
}

#[tokio::test]
async fn unregistered_scheme_fails_before_any_request() {
    let transport = ScriptedTransport::new(resource(10), vec![]);
    let mut sink = MemorySink::new();

    let err = streamer(&transport)
        .stream("ftp://media.example.com/track.webm", &mut sink)
        .await
        .unwrap_err();

    assert!(err.is_unsupported_scheme());
    assert!(transport.requests().is_empty());
    assert!(sink.data().is_empty());
    assert!(!sink.is_finalized());
}

#[tokio::test]
async fn invalid_locator_is_reported() {
    let transport = ScriptedTransport::new(resource(10), vec![]);
    let mut sink = MemorySink::new();

    let err = streamer(&transport).stream("not a url", &mut sink).await.unwrap_err();

    assert!(matches!(err, StreamError::Fetch(FetchError::InvalidLocator(_))));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn connect_failure_fails_by_default() {
    let transport = ScriptedTransport::new(resource(10), vec![Step::ConnectFail]);
    let mut sink = MemorySink::new();

    let err = streamer(&transport).stream(URL, &mut sink).await.unwrap_err();

    assert!(matches!(err, StreamError::Fetch(FetchError::Connection(_))));
    assert!(!sink.is_finalized());
    assert_eq!(transport.requests(), vec![0]);
}

#[tokio::test]
async fn connect_failure_retries_from_same_offset() {
    let data = resource(100);
    let transport = ScriptedTransport::new(
        data.clone(),
        vec![Step::cut(50, 100), Step::ConnectFail, Step::ConnectFail],
    );
    let mut sink = MemorySink::new();

    let result = streamer(&transport)
        .connect_failure(no_delay_retry(2))
        .stream(URL, &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.data(), &data[..]);
    assert_eq!(transport.requests(), vec![0, 50, 50, 50]);
    assert_eq!(result.attempts, 4);
}

#[tokio::test]
async fn connect_failure_retries_are_bounded() {
    let transport = ScriptedTransport::new(
        resource(100),
        vec![Step::ConnectFail, Step::ConnectFail, Step::ConnectFail],
    );
    let mut sink = MemorySink::new();

    let err = streamer(&transport)
        .connect_failure(no_delay_retry(2))
        .stream(URL, &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Fetch(FetchError::Connection(_))));
    assert_eq!(transport.requests(), vec![0, 0, 0]);
    assert!(!sink.is_finalized());
}

#[tokio::test]
async fn stall_policy_swallows_connect_failure_until_cancelled() {
    let data = resource(100);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::cut(30, 100), Step::ConnectFail]);
    let mut sink = MemorySink::new();

    let stalled = tokio::time::timeout(
        Duration::from_millis(100),
        streamer(&transport)
            .connect_failure(ConnectFailurePolicy::Stall)
            .stream(URL, &mut sink),
    )
    .await;

    assert!(stalled.is_err(), "停滞策略下不应返回");
    assert_eq!(transport.requests(), vec![0, 30]);
    assert_eq!(sink.data(), &data[..30]);
    assert!(!sink.is_finalized());

    let transport = ScriptedTransport::new(data.clone(), vec![Step::ConnectFail]);
    let streamer = streamer(&transport).connect_failure(ConnectFailurePolicy::Stall);
    let controller = streamer.controller();
    let mut sink = MemorySink::new();

    let (result, _) = tokio::join!(streamer.stream(URL, &mut sink), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.cancel();
    });

    assert!(result.unwrap_err().is_cancelled());
    assert!(!sink.is_finalized());
}

#[tokio::test]
async fn cancel_mid_stream_leaves_sink_open() {
    let data = resource(100);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::Hang { cut_at: 30 }]);
    let streamer = streamer(&transport);
    let controller = streamer.controller();
    let mut sink = MemorySink::new();

    let (result, _) = tokio::join!(streamer.stream(URL, &mut sink), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.cancel();
    });

    assert!(result.unwrap_err().is_cancelled());
    assert!(controller.is_cancelled());
    assert_eq!(sink.data(), &data[..30]);
    assert!(!sink.is_finalized());
    assert_eq!(transport.requests(), vec![0]);
}

#[tokio::test]
async fn cancel_before_start_issues_no_request() {
    let transport = ScriptedTransport::new(resource(100), vec![]);
    let streamer = streamer(&transport);
    streamer.controller().cancel();
    let mut sink = MemorySink::new();

    let err = streamer.stream(URL, &mut sink).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn resume_ignored_by_server_is_fatal() {
    let data = resource(100);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::cut(40, 100), Step::IgnoreRange]);
    let mut sink = MemorySink::new();

    let err = streamer(&transport).stream(URL, &mut sink).await.unwrap_err();

    assert!(matches!(
        err,
        StreamError::RangeNotSupported {
            requested: 40,
            actual: 0
        }
    ));
    assert_eq!(sink.data(), &data[..40]);
    assert!(!sink.is_finalized());
}

#[tokio::test]
async fn full_body_on_first_attempt_is_accepted() {
    let data = resource(64);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::IgnoreRange]);
    let mut sink = MemorySink::new();

    streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(sink.data(), &data[..]);
    assert_eq!(sink.finalize_count(), 1);
}

#[tokio::test]
async fn bytes_beyond_declared_length_are_dropped() {
    let data = resource(80);
    let transport = ScriptedTransport::new(
        data.clone(),
        vec![Step::Deliver {
            cut_at: None,
            declared: Some(50),
            body_error: false,
        }],
    );
    let mut sink = MemorySink::new();

    let result = streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(result.bytes_written, 50);
    assert_eq!(sink.data(), &data[..50]);
    assert_eq!(sink.finalize_count(), 1);
}

#[tokio::test]
async fn idle_attempt_limit_stops_retrying() {
    let transport = ScriptedTransport::new(
        resource(100),
        vec![Step::cut(0, 100), Step::cut(0, 100), Step::cut(0, 100)],
    );
    let mut sink = MemorySink::new();

    let err = streamer(&transport)
        .max_idle_attempts(3)
        .stream(URL, &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StreamError::NoProgress {
            received: 0,
            attempts: 3
        }
    ));
    assert_eq!(transport.requests(), vec![0, 0, 0]);
}

#[tokio::test]
async fn http_status_error_is_fatal() {
    let transport = ScriptedTransport::new(resource(100), vec![Step::cut(10, 100), Step::Status(404)]);
    let mut sink = MemorySink::new();

    let err = streamer(&transport).stream(URL, &mut sink).await.unwrap_err();

    assert!(matches!(err, StreamError::Fetch(FetchError::HttpStatus(404))));
    assert_eq!(transport.requests(), vec![0, 10]);
}

#[tokio::test]
async fn progress_property_and_hooks_follow_the_transfer() {
    let data = resource(100);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::cut(60, 100)]);

    let attempts_seen = Arc::new(Mutex::new(Vec::new()));
    let progress_seen = Arc::new(Mutex::new(Vec::new()));
    let chunk_bytes = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));

    let streamer = {
        let attempts_seen = Arc::clone(&attempts_seen);
        let progress_seen = Arc::clone(&progress_seen);
        let chunk_bytes = Arc::clone(&chunk_bytes);
        let completed = Arc::clone(&completed);
        streamer(&transport)
            .with_before_attempt_hook(move |offset, attempt| {
                attempts_seen.lock().unwrap().push((offset, attempt));
                async { Ok(()) }
            })
            .with_on_chunk_hook(move |chunk| {
                chunk_bytes.fetch_add(chunk.len(), Ordering::Relaxed);
            })
            .with_on_progress_hook(move |done, total| {
                progress_seen.lock().unwrap().push((done, total));
            })
            .with_after_complete_hook(move || {
                let completed = Arc::clone(&completed);
                async move {
                    completed.fetch_add(1, Ordering::Relaxed);
                }
            })
    };
    let progress = streamer.progress();
    let mut sink = MemorySink::new();

    streamer.stream(URL, &mut sink).await.unwrap();

    assert_eq!(*attempts_seen.lock().unwrap(), vec![(0, 1), (60, 2)]);
    assert_eq!(chunk_bytes.load(Ordering::Relaxed), 100);
    assert_eq!(completed.load(Ordering::Relaxed), 1);

    let seen = progress_seen.lock().unwrap().clone();
    assert!(seen.windows(2).all(|w| w[0].0 < w[1].0));
    assert_eq!(seen.last(), Some(&(100, Some(100))));

    let last = progress.get_current().unwrap();
    assert_eq!(last.bytes_done, 100);
    assert_eq!(last.total, Some(100));
    assert_eq!(last.attempts, 2);
    assert!(last.finished);
    assert!((last.pct() - 100.0).abs() < f64::EPSILON);
}

struct AbortOnResume;

#[async_trait]
impl StreamHook for AbortOnResume {
    async fn before_attempt(&mut self, offset: u64, _attempt: u32) -> Result<(), HookAbort> {
        if offset > 0 { Err(HookAbort) } else { Ok(()) }
    }
}

#[tokio::test]
async fn hook_can_abort_before_resume() {
    let transport = ScriptedTransport::new(resource(100), vec![Step::cut(20, 100)]);
    let mut sink = MemorySink::new();

    let err = streamer(&transport)
        .with_hook(AbortOnResume)
        .stream(URL, &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::HookAbort(_)));
    assert_eq!(transport.requests(), vec![0]);
    assert!(!sink.is_finalized());
}

struct BrokenSink;

#[async_trait]
impl ByteSink for BrokenSink {
    async fn write(&mut self, _chunk: &[u8]) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
    }

    async fn finalize(&mut self) -> std::io::Result<()> {
        panic!("失败的传输不应收尾");
    }
}

#[tokio::test]
async fn sink_write_error_is_fatal() {
    let transport = ScriptedTransport::new(resource(100), vec![]);

    let err = streamer(&transport).stream(URL, &mut BrokenSink).await.unwrap_err();

    assert!(matches!(err, StreamError::Sink(_)));
}

#[tokio::test]
async fn writer_sink_receives_the_whole_resource() {
    let data = resource(300);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::cut(120, 300), Step::cut(121, 300)]);
    let mut sink = WriterSink::new(Vec::new());

    streamer(&transport).stream(URL, &mut sink).await.unwrap();

    assert_eq!(sink.bytes_written(), 300);
    assert_eq!(sink.into_inner(), data.to_vec());
}

#[tokio::test]
async fn writer_sink_saves_to_local_file() {
    let data = resource(500);
    let transport = ScriptedTransport::new(data.clone(), vec![Step::cut(200, 500)]);
    let path = std::env::temp_dir().join(format!("resumable_stream_{}.bin", std::process::id()));
    let mut sink = WriterSink::create(&path).await.unwrap();

    streamer(&transport).stream(URL, &mut sink).await.unwrap();
    drop(sink);

    let saved = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(saved, data.to_vec());
}

#[tokio::test]
async fn independent_transfers_run_concurrently() {
    let a = resource(200);
    let b = resource(333);
    let ta = ScriptedTransport::new(a.clone(), vec![Step::cut(50, 200), Step::cut(150, 200)]);
    let tb = ScriptedTransport::new(b.clone(), vec![Step::cut(300, 333)]);
    let mut sa = MemorySink::new();
    let mut sb = MemorySink::new();

    let (ra, rb) = tokio::join!(
        streamer(&ta).stream(URL, &mut sa),
        streamer(&tb).stream("http://other.example.com/b.opus", &mut sb),
    );

    assert_eq!(ra.unwrap().bytes_written, 200);
    assert_eq!(rb.unwrap().bytes_written, 333);
    assert_eq!(sa.data(), &a[..]);
    assert_eq!(sb.data(), &b[..]);
    assert_eq!(ta.requests(), vec![0, 50, 150]);
    assert_eq!(tb.requests(), vec![0, 300]);
}
