use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};

use futures::future::BoxFuture;
use mplex_io::config::{ResolverBackend, ResolverSettings};
use mplex_io::{ErrorKind, IoConfig, IoContext, Resolve, ResolveFlags, Result, TcpResolver, error};

/// Backend answering every lookup with a fixed list.
struct StaticResolver(Vec<IpAddr>);

impl Resolve for StaticResolver {
    fn lookup(&self, _host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>> {
        let addrs = self.0.clone();
        Box::pin(async move { Ok(addrs) })
    }
}

/// Backend for which no name exists.
struct FailingResolver;

impl Resolve for FailingResolver {
    fn lookup(&self, host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>> {
        let err = error::host_not_found(host);
        Box::pin(async move { Err(err) })
    }
}

/// Backend whose lookups never finish.
struct StalledResolver;

impl Resolve for StalledResolver {
    fn lookup(&self, _host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>> {
        Box::pin(futures::future::pending())
    }
}

fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

#[test]
fn ip_literal_resolves_without_lookup() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::with_backend(&ctx, Arc::new(FailingResolver));

    let results = resolver.resolve("127.0.0.1", "80").unwrap();
    assert_eq!(results.len(), 1);
    let entry = results.get(0).unwrap();
    assert_eq!(entry.endpoint(), SocketAddr::new(v4(127, 0, 0, 1), 80));
    assert_eq!(entry.host_name(), "127.0.0.1");
    assert_eq!(entry.service_name(), "80");

    let results = resolver.resolve("::1", "https").unwrap();
    assert_eq!(
        results.endpoints().collect::<Vec<_>>(),
        vec![SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 443)]
    );
}

#[test]
fn localhost_resolves_through_the_system() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::new(&ctx);

    let results = resolver.resolve("localhost", "http").unwrap();
    assert!(!results.is_empty());
    for endpoint in results.endpoints() {
        assert!(endpoint.ip().is_loopback());
        assert_eq!(endpoint.port(), 80);
    }
}

#[test]
fn unknown_service_is_reported() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::new(&ctx);

    let err = resolver.resolve("127.0.0.1", "no-such-service").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServiceNotFound);
}

#[test]
fn numeric_host_flag_refuses_names() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::with_backend(&ctx, Arc::new(StaticResolver(vec![v4(10, 0, 0, 1)])));

    let err = resolver
        .resolve_with_flags("example.com", "80", ResolveFlags::numeric())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HostNotFound);
}

#[test]
fn empty_host_depends_on_passive() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::new(&ctx);

    let passive = resolver
        .resolve_with_flags("", "9000", ResolveFlags::passive())
        .unwrap();
    assert!(passive.endpoints().all(|e| e.ip().is_unspecified() && e.port() == 9000));

    let active = resolver.resolve("", "9000").unwrap();
    assert!(active.endpoints().all(|e| e.ip().is_loopback()));
}

#[test]
fn results_are_ordered_by_family_and_deduplicated() {
    let ctx = IoContext::new();
    let v6 = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
    let backend = StaticResolver(vec![v6, v4(192, 0, 2, 1), v4(192, 0, 2, 1), v4(192, 0, 2, 2)]);
    let resolver = TcpResolver::with_backend(&ctx, Arc::new(backend));

    let ips: Vec<_> = resolver
        .resolve("example.test", "80")
        .unwrap()
        .endpoints()
        .map(|e| e.ip())
        .collect();
    assert_eq!(ips, vec![v4(192, 0, 2, 1), v4(192, 0, 2, 2), v6]);
}

#[test]
fn prefer_ipv6_puts_v6_first() {
    let config = IoConfig {
        resolver: ResolverSettings {
            prefer_ipv6: true,
            ..ResolverSettings::default()
        },
        ..IoConfig::default()
    };
    let ctx = IoContext::with_config(config).unwrap();
    let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);
    let resolver =
        TcpResolver::with_backend(&ctx, Arc::new(StaticResolver(vec![v4(127, 0, 0, 1), v6])));

    let first = resolver.resolve("dual.test", "80").unwrap().get(0).unwrap().endpoint();
    assert_eq!(first.ip(), v6);
}

#[test]
fn async_resolve_delivers_results_on_the_loop() {
    let ctx = IoContext::new();
    let resolver =
        TcpResolver::with_backend(&ctx, Arc::new(StaticResolver(vec![v4(198, 51, 100, 7)])));
    let (tx, rx) = mpsc::channel();

    resolver.async_resolve("service.test", "ws", move |result| {
        tx.send(result.map(|r| r.endpoints().collect::<Vec<_>>()).ok()).unwrap();
    });
    assert!(rx.try_recv().is_err(), "handler must not run before the loop does");

    assert_eq!(ctx.run(), 1);
    assert_eq!(
        rx.recv().unwrap(),
        Some(vec![SocketAddr::new(v4(198, 51, 100, 7), 80)])
    );
}

#[test]
fn async_resolve_failure_invokes_handler_once() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::with_backend(&ctx, Arc::new(FailingResolver));
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel();

    let counter = Arc::clone(&calls);
    resolver.async_resolve("nonexistent.invalid", "80", move |result| {
        counter.fetch_add(1, Ordering::SeqCst);
        tx.send(result.map_err(|e| e.kind()).err()).unwrap();
    });

    assert_eq!(ctx.run(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(rx.recv().unwrap(), Some(ErrorKind::HostNotFound));
}

#[test]
fn unresolvable_system_name_fails() {
    let config = IoConfig {
        resolver: ResolverSettings {
            timeout_ms: Some(10_000),
            ..ResolverSettings::default()
        },
        ..IoConfig::default()
    };
    let ctx = IoContext::with_config(config).unwrap();
    let resolver = TcpResolver::new(&ctx);
    let (tx, rx) = mpsc::channel();

    resolver.async_resolve("nonexistent.invalid", "80", move |result| {
        tx.send(result.is_err()).unwrap();
    });

    assert_eq!(ctx.run(), 1);
    assert!(rx.recv().unwrap());
}

#[test]
fn cancel_aborts_in_flight_resolves() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::with_backend(&ctx, Arc::new(StalledResolver));
    let (tx, rx) = mpsc::channel();

    resolver.async_resolve("slow.test", "80", move |result| {
        tx.send(result.map_err(|e| e.kind()).err()).unwrap();
    });
    assert_eq!(resolver.cancel(), 1);

    assert_eq!(ctx.run(), 1);
    assert_eq!(rx.recv().unwrap(), Some(ErrorKind::OperationAborted));
}

#[test]
fn dropping_the_resolver_aborts_in_flight_resolves() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::with_backend(&ctx, Arc::new(StalledResolver));
    let (tx, rx) = mpsc::channel();

    resolver.async_resolve("slow.test", "80", move |result| {
        tx.send(result.is_err()).unwrap();
    });
    drop(resolver);

    assert_eq!(ctx.run(), 1);
    assert!(rx.recv().unwrap());
}

#[test]
fn lookups_respect_the_configured_timeout() {
    let config = IoConfig {
        resolver: ResolverSettings {
            timeout_ms: Some(50),
            ..ResolverSettings::default()
        },
        ..IoConfig::default()
    };
    let ctx = IoContext::with_config(config).unwrap();
    let resolver = TcpResolver::with_backend(&ctx, Arc::new(StalledResolver));

    let err = resolver.resolve("slow.test", "80").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimedOut);
}

#[test]
fn cloned_results_share_one_snapshot() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::new(&ctx);

    let results = resolver.resolve("127.0.0.1", "80").unwrap();
    let copy = results.clone();
    assert!(results.ptr_eq(&copy));

    let again = resolver.resolve("127.0.0.1", "80").unwrap();
    assert!(!results.ptr_eq(&again));
}

#[test]
fn resolver_outliving_its_context_reports_a_reactor_error() {
    let ctx = IoContext::new();
    let resolver = TcpResolver::new(&ctx.handle());
    drop(ctx);

    let err = resolver.resolve("127.0.0.1", "80").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reactor);
}

fn hickory_context() -> IoContext {
    let config = IoConfig {
        resolver: ResolverSettings {
            backend: ResolverBackend::Hickory,
            timeout_ms: Some(10_000),
            ..ResolverSettings::default()
        },
        ..IoConfig::default()
    };
    IoContext::with_config(config).unwrap()
}

#[test]
fn hickory_backend_resolves_localhost() {
    let ctx = hickory_context();
    let resolver = TcpResolver::new(&ctx);

    let results = resolver.resolve("localhost", "80").unwrap();
    assert!(!results.is_empty());
    for entry in &results {
        assert!(entry.endpoint().ip().is_loopback(), "{entry:?}");
        assert_eq!(entry.endpoint().port(), 80);
        assert_eq!(entry.host_name(), "localhost");
    }
}

#[test]
fn hickory_backend_answers_async_resolves_on_the_loop() {
    let ctx = hickory_context();
    let resolver = TcpResolver::new(&ctx);
    let (tx, rx) = mpsc::channel();

    resolver.async_resolve("localhost", "https", move |result| {
        let ports: Vec<u16> = result.unwrap().endpoints().map(|e| e.port()).collect();
        tx.send(ports).unwrap();
    });

    assert_eq!(ctx.run(), 1);
    let ports = rx.recv().unwrap();
    assert!(!ports.is_empty());
    assert!(ports.iter().all(|port| *port == 443));
}
