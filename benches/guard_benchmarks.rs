use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bookadmin::auth::{token, FixedClock, MemoryStorage, Role, SessionStore, UserInfo};
use bookadmin::router::{routes, LogNotifier, NavigationGuard, Router};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

const NOW: i64 = 1_750_000_000;

fn sample_token() -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"user_id":1,"username":"alice","role":"admin","exp":{}}}"#,
        NOW + 3600
    ));
    format!("{}.{}.signature", header, payload)
}

fn session(role: Role) -> SessionStore {
    let session = SessionStore::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(FixedClock::at_secs(NOW)),
    );
    session
        .set_session(&sample_token(), &UserInfo::with_role(role))
        .unwrap();
    session
}

fn bench_token(c: &mut Criterion) {
    let token = sample_token();
    let now_ms = NOW * 1000;

    c.bench_function("token_decode_payload", |b| {
        b.iter(|| token::decode_payload(black_box(&token)))
    });

    c.bench_function("token_inspect", |b| {
        b.iter(|| token::inspect(black_box(&token), black_box(now_ms)))
    });
}

fn bench_session(c: &mut Criterion) {
    let session = session(Role::Librarian);

    c.bench_function("session_is_logged_in", |b| {
        b.iter(|| black_box(&session).is_logged_in())
    });

    c.bench_function("session_has_elevated_role", |b| {
        b.iter(|| black_box(&session).has_elevated_role())
    });
}

fn bench_routing(c: &mut Criterion) {
    let table = routes::route_table();

    c.bench_function("route_resolve_child", |b| {
        b.iter(|| routes::resolve(&table, black_box("/statistics")))
    });

    let guard = NavigationGuard::new(session(Role::Reader), Arc::new(LogNotifier));
    let allowed = routes::resolve(&table, "/ranking");
    let denied = routes::resolve(&table, "/readers");

    c.bench_function("guard_check_allow", |b| {
        b.iter(|| guard.check(black_box(&allowed)))
    });

    c.bench_function("guard_check_forbidden", |b| {
        b.iter(|| guard.check(black_box(&denied)))
    });

    let router = Router::new(NavigationGuard::new(
        session(Role::Admin),
        Arc::new(LogNotifier),
    ));
    c.bench_function("router_push_with_redirect", |b| {
        b.iter(|| router.push(black_box("/")))
    });
}

criterion_group!(benches, bench_token, bench_session, bench_routing);
criterion_main!(benches);
