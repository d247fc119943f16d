use nomen::{capability, Catalog, Container, Inject, InstantiatorResult, Instance, TypeDef};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

trait Auth {
    fn check(&self, username: &str, password: &str) -> bool;
}

struct DbAuth;

impl DbAuth {
    fn connect(dsn: String, user: String, pass: String) -> InstantiatorResult<Self> {
        info!(dsn = dsn.as_str(), user = user.as_str(), pass = pass.as_str(), "Connecting to database");
        Ok(Self)
    }
}

impl Auth for DbAuth {
    fn check(&self, _username: &str, _password: &str) -> bool {
        info!("Checking username, password from database");
        true
    }
}

struct HttpAuth;

impl Auth for HttpAuth {
    fn check(&self, _username: &str, _password: &str) -> bool {
        info!("Checking username, password from HTTP authentication");
        true
    }
}

struct Session;

impl Session {
    fn set(&self, name: &str, value: &str) {
        info!(name, value, "Set session variable");
    }
}

struct App {
    auth: Box<dyn Auth>,
    session: Box<Session>,
}

impl App {
    fn login(&self, username: &str, password: &str) -> bool {
        if self.auth.check(username, password) {
            self.session.set("username", username);
            return true;
        }
        false
    }
}

capability!(dyn Auth => "Auth", Session => "Session");

fn init_container() -> Container {
    Container::new(
        Catalog::new()
            .define(TypeDef::literal("DbAuth", DbAuth::connect).implements::<dyn Auth>(|auth| Box::new(auth)))
            .define(TypeDef::literal("HttpAuth", || Ok(HttpAuth)).implements::<dyn Auth>(|auth| Box::new(auth)))
            .define(TypeDef::literal("Session", || Ok(Session)))
            .define(TypeDef::autowired(
                "App",
                |Inject(auth): Inject<dyn Auth>, Inject(session): Inject<Session>| Ok(App { auth, session }),
            )),
    )
}

fn app_from(auth: Instance, session: Instance) -> Result<App, nomen::ResolveErrorKind> {
    Ok(App {
        auth: auth.into_capability()?,
        session: session.into_capability()?,
    })
}

fn main() -> Result<(), nomen::ResolveErrorKind> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy())
        .init();

    let container = init_container();

    // The binding is picked once at startup, the rest of the code only knows the `Auth` name
    if std::env::var("APP_ENV").is_ok_and(|env| env == "production") {
        container.register_with_args("Auth", "DbAuth", ["mysql://localhost", "root", "123456"]);
    } else {
        container.register("Auth", "HttpAuth");
    }
    for (name, binding) in container.registry().iter() {
        info!(name = name.as_str(), %binding, "Bound");
    }

    // Get each collaborator by name
    let app = app_from(container.get("Auth")?, container.get("Session")?)?;
    info!(logged_in = app.login("jaceju", "password"), "Login with `get`");

    // Get the collaborators in order and pass them to a factory
    let app = container.inject(["Auth", "Session"], |[auth, session]| app_from(auth, session))??;
    info!(logged_in = app.login("jaceju", "password"), "Login with `inject`");

    // Let the container wire the constructor parameters
    let Ok(app) = container.resolve("App")?.downcast::<App>() else {
        unreachable!("`App` is constructed from the `App` definition");
    };
    info!(logged_in = app.login("jaceju", "password"), "Login with `resolve`");

    Ok(())
}
