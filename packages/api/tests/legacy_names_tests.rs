use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use chrono::TimeDelta;
use futures::future::BoxFuture;
use mplex_asio::io_service::{Strand, Work};
use mplex_asio::ip::tcp::resolver::{Resolve, ResolveFlags};
use mplex_asio::ip::tcp::{self, Query, Resolver};
use mplex_asio::socket_base::{self, ReuseAddress};
use mplex_asio::{Errc, ErrorCode, IoService, Result, SteadyTimer, is_neg, milliseconds};

const _: () = assert!(socket_base::MAX_CONNECTIONS > 0);

/// Backend for which no name exists.
struct NoSuchHost;

impl Resolve for NoSuchHost {
    fn lookup(&self, host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>> {
        let err = ErrorCode::HostNotFound {
            host: host.to_owned(),
        };
        Box::pin(async move { Err(err) })
    }
}

/// Backend whose lookups never finish.
struct Stalled;

impl Resolve for Stalled {
    fn lookup(&self, _host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>> {
        Box::pin(futures::future::pending())
    }
}

#[test]
fn post_then_reset_allows_a_second_run() {
    let io = IoService::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let h = Arc::clone(&hits);
    io.post(move || {
        h.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(io.run(), 1);
    assert!(io.stopped());

    let h = Arc::clone(&hits);
    io.post(move || {
        h.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(io.run(), 0);

    io.reset();
    assert!(!io.stopped());
    assert_eq!(io.run(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn dropping_the_service_destroys_handlers_that_never_ran() {
    let io = IoService::new();
    let marker = Arc::new(());
    let watch = Arc::downgrade(&marker);

    let handle = io.handle();
    io.post(move || {
        handle.stop();
        drop(marker);
    });
    drop(io);

    assert!(watch.upgrade().is_none());
}

#[test]
fn wrapped_handlers_never_overlap() {
    let io = IoService::new();
    let strand = Strand::new(&io);
    let active = Arc::new(AtomicUsize::new(0));
    let max_active = Arc::new(AtomicUsize::new(0));
    let ran = Arc::new(AtomicUsize::new(0));

    for _ in 0..100 {
        let active = Arc::clone(&active);
        let max_active = Arc::clone(&max_active);
        let ran = Arc::clone(&ran);
        io.post(strand.wrap(move || {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            max_active.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_micros(100));
            active.fetch_sub(1, Ordering::SeqCst);
            ran.fetch_add(1, Ordering::SeqCst);
        }));
    }

    let executed: usize = thread::scope(|scope| {
        let runners: Vec<_> = (0..4).map(|_| scope.spawn(|| io.run())).collect();
        runners.into_iter().map(|r| r.join().unwrap()).sum()
    });

    assert_eq!(ran.load(Ordering::SeqCst), 100);
    assert!(executed >= 100);
    assert_eq!(max_active.load(Ordering::SeqCst), 1);
}

#[test]
fn wrap_with_passes_the_completion_argument() {
    let io = IoService::new();
    let strand = Strand::new(&io);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let s = Arc::clone(&seen);
    let inner = strand.clone();
    let handler = strand.wrap_with(move |value: u32| {
        assert!(inner.running_in_this_thread());
        s.lock().unwrap().push(value);
    });
    io.post(move || handler(7));

    assert_eq!(io.run(), 1);
    assert_eq!(*seen.lock().unwrap(), vec![7]);
}

#[test]
fn work_keeps_run_from_returning() {
    let io = IoService::new();
    let work = Work::new(&io);
    let (tx, rx) = mpsc::channel();

    let runner = {
        let io = io.handle();
        thread::spawn(move || {
            let executed = io.run();
            tx.send(executed).unwrap();
        })
    };

    assert!(
        rx.recv_timeout(Duration::from_millis(100)).is_err(),
        "run returned while work was held"
    );
    io.post(|| {});
    drop(work);

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
    runner.join().unwrap();
}

#[test]
fn expires_from_now_counts_down_and_goes_negative() {
    let io = IoService::new();
    let mut timer = SteadyTimer::new(&io);
    let requested = Duration::from_millis(200);

    timer.set_expires_from_now(requested);
    let left = timer.expires_from_now();
    let requested = TimeDelta::from_std(requested).unwrap();
    assert!(left <= requested);
    assert!(left > requested - milliseconds(50));
    assert!(!is_neg(left));

    timer.expires_after(Duration::from_millis(10));
    timer.wait().unwrap();
    thread::sleep(Duration::from_millis(2));
    assert!(is_neg(timer.expires_from_now()));
}

#[test]
fn expires_from_now_does_not_touch_the_expiry() {
    let io = IoService::new();
    let timer = SteadyTimer::with_expiry_after(&io, Duration::from_secs(30));
    let expiry = timer.expiry();

    let first = timer.expires_from_now();
    let second = timer.expires_from_now();
    assert!(second <= first);
    assert_eq!(timer.expiry(), expiry);
}

#[test]
fn async_wait_passes_through() {
    let io = IoService::new();
    let timer = SteadyTimer::with_expiry_after(&io, Duration::from_millis(20));
    let start = Instant::now();
    let (tx, rx) = mpsc::channel();

    timer.async_wait(move |result| tx.send(result.is_ok()).unwrap());
    assert_eq!(io.run(), 1);
    assert!(rx.recv().unwrap());
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn async_resolve_of_unresolvable_host_reports_once_with_end_iterator() {
    let io = IoService::new();
    let resolver = Resolver::with_backend(&io, Arc::new(NoSuchHost));
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel();

    let c = Arc::clone(&calls);
    resolver.async_resolve(&Query::new("nowhere.invalid", "80"), move |result, it| {
        c.fetch_add(1, Ordering::SeqCst);
        tx.send((result.map_err(|e| e.kind()), it)).unwrap();
    });

    assert_eq!(io.run(), 1);
    let (result, it) = rx.recv().unwrap();
    assert_eq!(result, Err(Errc::HostNotFound));
    assert_eq!(it, tcp::Iterator::default());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn async_resolve_success_yields_an_iterator_at_the_first_entry() {
    let io = IoService::new();
    let resolver = Resolver::with_backend(&io, Arc::new(NoSuchHost));
    let (tx, rx) = mpsc::channel();

    // IP literals never reach the backend.
    resolver.async_resolve(&Query::new("127.0.0.1", "http"), move |result, it| {
        tx.send((result.is_ok(), it)).unwrap();
    });

    assert_eq!(io.run(), 1);
    let (ok, mut it) = rx.recv().unwrap();
    assert!(ok);
    let localhost_http = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 80);
    assert_eq!(it.endpoint(), localhost_http);
    assert_eq!(it.host_name(), "127.0.0.1");
    assert_eq!(it.service_name(), "http");
    it.advance();
    assert_eq!(it, tcp::Iterator::default());
}

#[test]
fn resolve_propagates_errors_unchanged() {
    let io = IoService::new();
    let resolver = Resolver::new(&io);

    let numeric = Query::new("not-an-address.invalid", "80").with_flags(ResolveFlags {
        numeric_host: true,
        ..ResolveFlags::default()
    });
    let err = resolver.resolve(&numeric).unwrap_err();
    assert_eq!(err.kind(), Errc::HostNotFound);

    let bad_service = Query::new("127.0.0.1", "no-such-service");
    let err = resolver.resolve(&bad_service).unwrap_err();
    assert_eq!(err.kind(), Errc::ServiceNotFound);
}

#[test]
fn passive_query_resolves_to_unspecified_addresses() {
    let io = IoService::new();
    let resolver = Resolver::new(&io);
    let query = Query::passive("8080");
    assert_eq!(query.host_name(), "");
    assert!(query.flags().passive);

    let endpoints: Vec<_> = resolver
        .resolve(&query)
        .unwrap()
        .map(|entry| entry.endpoint())
        .collect();
    assert!(!endpoints.is_empty());
    assert!(endpoints.iter().all(|e| e.ip().is_unspecified()));
    assert!(endpoints.iter().all(|e| e.port() == 8080));
}

#[test]
fn cancel_aborts_outstanding_resolves() {
    let io = IoService::new();
    let resolver = Resolver::with_backend(&io, Arc::new(Stalled));
    let (tx, rx) = mpsc::channel();

    let query = Query::new("slow.example", "443");
    resolver.async_resolve(&query, move |result, it| {
        let outcome = (result.map_err(|e| e.kind()), it.is_end());
        tx.send(outcome).unwrap();
    });
    assert_eq!(resolver.cancel(), 1);

    assert_eq!(io.run(), 1);
    assert_eq!(rx.recv().unwrap(), (Err(Errc::OperationAborted), true));
}

#[test]
fn socket_base_names_match_the_modern_ones() {
    let modern = mplex_io::MAX_LISTEN_CONNECTIONS;
    assert_eq!(socket_base::MAX_CONNECTIONS, modern);
    assert!(ReuseAddress(true).value());
    assert!(!ReuseAddress::from(false).value());
}

#[test]
fn tcp_protocol_values() {
    assert_ne!(tcp::v4(), tcp::v6());
    let endpoint: tcp::Endpoint = "127.0.0.1:0".parse().unwrap();
    assert_eq!(tcp::Tcp::of(&endpoint), tcp::v4());
}
