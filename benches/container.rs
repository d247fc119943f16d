#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use nomen::{capability, Catalog, Container, Inject, InstantiateErrorKind, TypeDef};

trait Auth {}

struct DbAuth(String, String, String);
struct HttpAuth;
struct Session;
struct App(Box<dyn Auth>, Box<Session>);

impl Auth for DbAuth {}
impl Auth for HttpAuth {}

capability!(dyn Auth => "Auth", Session => "Session");

#[inline]
fn catalog() -> Catalog {
    Catalog::new()
        .define(
            TypeDef::literal("DbAuth", |dsn: String, user: String, pass: String| Ok(DbAuth(dsn, user, pass)))
                .implements::<dyn Auth>(|auth| Box::new(auth)),
        )
        .define(TypeDef::literal("HttpAuth", || Ok(HttpAuth)).implements::<dyn Auth>(|auth| Box::new(auth)))
        .define(TypeDef::literal("Session", || Ok(Session)))
        .define(TypeDef::autowired(
            "App",
            |Inject(auth): Inject<dyn Auth>, Inject(session): Inject<Session>| Ok(App(auth, session)),
        ))
}

#[inline]
fn container_register(container: &Container) {
    container.register_with_args("Auth", "DbAuth", ["mysql://localhost", "root", "123456"]);
}

#[inline]
fn container_get(container: &Container) {
    let _ = container.get("Auth").unwrap();
}

#[inline]
fn container_inject(container: &Container) {
    let _ = container.inject(["Auth", "Session"], |[auth, session]| (auth, session)).unwrap();
}

#[inline]
fn container_inject_with(container: &Container) {
    let _ = container
        .inject_with(|Inject(auth): Inject<dyn Auth>, Inject(session): Inject<Session>| {
            Ok::<_, InstantiateErrorKind>(App(auth, session))
        })
        .unwrap();
}

#[inline]
fn container_resolve(container: &Container) {
    let _ = container.resolve("App").unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let container_1 = Container::new(catalog());
    container_1.register_with_args("Auth", "DbAuth", ["mysql://localhost", "root", "123456"]);
    let container_2 = Container::new(catalog());
    container_2.register("Auth", "HttpAuth");

    c.bench_function("container_new", |b| b.iter(|| Container::new(catalog())))
        .bench_function("container_register", |b| b.iter(|| container_register(&container_1)))
        .bench_function("container_get_with_args", |b| b.iter(|| container_get(&container_1)))
        .bench_function("container_get", |b| b.iter(|| container_get(&container_2)))
        .bench_function("container_inject", |b| b.iter(|| container_inject(&container_2)))
        .bench_function("container_inject_with", |b| b.iter(|| container_inject_with(&container_2)))
        .bench_function("container_resolve", |b| b.iter(|| container_resolve(&container_1)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
