use std::rc::Rc;
use std::time::Duration;

use filefolio_core::catalog::load_remote;
use filefolio_core::{
    Catalog, ClientConfig, ClientError, HttpBackend, MemoryStorage, Notice, Session, SessionStorage,
    SessionStore, StaticBaseline,
};
use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use tracing::{error, info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::components::navbar::Navbar;
use crate::components::notice_banner::NoticeBanner;
use crate::pages::auth::{ForgotPasswordPage, LoginPage, ResetPasswordPage, SignupPage};
use crate::pages::contact::ContactPage;
use crate::pages::home::HomePage;
use crate::pages::profile::ProfilePage;
use crate::pages::update_project::UpdateProjectPage;
use crate::pages::upload::UploadPage;
use crate::pages::view_project::ViewProjectPage;
use crate::storage::BrowserStorage;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(4);

/// Shared handles for every page. The session store and HTTP client are not
/// `Send`, so they live in local stored values; views read the reactive
/// mirrors instead.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: ReadSignal<Session>,
    pub catalog: RwSignal<Catalog>,
    pub catalog_loading: RwSignal<bool>,
    pub notice: RwSignal<Option<Notice>>,
    pub fallback_avatars: StoredValue<Vec<String>>,
    store: StoredValue<SessionStore, LocalStorage>,
    backend: StoredValue<HttpBackend, LocalStorage>,
}

impl AppContext {
    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }

    pub fn backend(&self) -> HttpBackend {
        self.backend.get_value()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_authenticated())
    }

    /// Show `notice` until it is replaced or times out.
    pub fn notify(&self, notice: Notice) {
        let slot = self.notice;
        slot.set(Some(notice.clone()));
        set_timeout(
            move || {
                slot.update(|current| {
                    if current.as_ref() == Some(&notice) {
                        *current = None;
                    }
                });
            },
            NOTICE_TIMEOUT,
        );
    }

    pub fn report(&self, err: &ClientError, fallback: &str) {
        warn!("{}: {}", fallback, err);
        self.notify(Notice::from_error(err, fallback));
    }

    /// Refetch the live project list. The bundled list stays visible meanwhile.
    pub fn refresh_catalog(&self) {
        let ctx = *self;
        ctx.catalog_loading.set(true);
        spawn_local(async move {
            let remote = load_remote(&ctx.backend()).await;
            ctx.catalog.update(|c| c.set_remote(remote));
            ctx.catalog_loading.set(false);
        });
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

fn load_config() -> ClientConfig {
    match ClientConfig::from_toml(include_str!("../filefolio.toml")) {
        Ok(config) => config,
        Err(e) => {
            warn!("Falling back to default client config: {}", e);
            ClientConfig::default()
        }
    }
}

fn open_storage() -> Rc<dyn SessionStorage> {
    match BrowserStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            warn!("Session will not survive a reload: {}", e);
            Rc::new(MemoryStorage::new())
        }
    }
}

fn open_backend(config: &ClientConfig) -> HttpBackend {
    HttpBackend::new(config)
        .or_else(|e| {
            error!("Unusable API base URL, using the default: {}", e);
            HttpBackend::new(&ClientConfig::default())
        })
        .expect("built-in API base URL is valid")
}

fn load_baseline() -> StaticBaseline {
    StaticBaseline::bundled().unwrap_or_else(|e| {
        error!("Bundled projects unavailable: {}", e);
        StaticBaseline::default()
    })
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let backend = open_backend(&config);
    info!("Using API at {}", backend.base_url());

    let store = SessionStore::new(
        open_storage(),
        config.fallback_avatars.clone(),
        js_sys::Date::now() as u64,
    );
    if let Err(e) = store.restore() {
        warn!("Could not restore session: {}", e);
    }

    let (session, set_session) = signal(store.session());
    store.subscribe(move |s| set_session.set(s.clone()));

    let ctx = AppContext {
        session,
        catalog: RwSignal::new(Catalog::new(load_baseline()).with_cap(config.catalog_cap)),
        catalog_loading: RwSignal::new(false),
        notice: RwSignal::new(None),
        fallback_avatars: StoredValue::new(config.fallback_avatars.clone()),
        store: StoredValue::new_local(store),
        backend: StoredValue::new_local(backend),
    };
    provide_context(ctx);

    // Load the live project list on mount
    Effect::new(move |_| {
        ctx.refresh_catalog();
    });

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <NoticeBanner />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/project") view=ViewProjectPage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/signup") view=SignupPage />
                        <Route path=path!("/forgot-password") view=ForgotPasswordPage />
                        <Route path=path!("/reset-password") view=ResetPasswordPage />
                        <Route path=path!("/upload") view=UploadPage />
                        <Route path=path!("/update-project/:id") view=UpdateProjectPage />
                        <Route path=path!("/profile") view=ProfilePage />
                        <Route path=path!("/contact") view=ContactPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
