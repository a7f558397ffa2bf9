//! Scripted backend and context builders for flow tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use super::FlowContext;
use crate::api::{ApiError, ApiResult, Backend, Credentials, Session, UserRecord, UsersPage};
use crate::router::Router;
use crate::storage::{MemoryStorage, Storage};
use crate::store::Store;

/// A queued reply: ready now, or released later through a channel.
pub(crate) enum Reply<T> {
    Ready(ApiResult<T>),
    Gated(oneshot::Receiver<ApiResult<T>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> ApiResult<T> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::transport("gate dropped"))),
        }
    }
}

#[derive(Default)]
pub(crate) struct ScriptedBackend {
    logins: Mutex<VecDeque<Reply<Session>>>,
    pages: Mutex<VecDeque<Reply<UsersPage>>>,
    profiles: Mutex<VecDeque<Reply<Session>>>,
    pub login_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub last_list_args: Mutex<Option<(usize, usize)>>,
}

impl ScriptedBackend {
    pub fn push_login(&self, reply: Reply<Session>) {
        self.logins.lock().unwrap().push_back(reply);
    }

    pub fn push_page(&self, reply: Reply<UsersPage>) {
        self.pages.lock().unwrap().push_back(reply);
    }

    pub fn push_profile(&self, reply: Reply<Session>) {
        self.profiles.lock().unwrap().push_back(reply);
    }

    fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Reply<T> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Ready(Err(ApiError::transport("no scripted reply"))))
    }
}

impl Backend for ScriptedBackend {
    async fn authenticate(&self, _credentials: &Credentials) -> ApiResult<Session> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let reply = Self::next(&self.logins);
        reply.resolve().await
    }

    async fn list_users(&self, limit: usize, skip: usize) -> ApiResult<UsersPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_list_args.lock().unwrap() = Some((limit, skip));
        let reply = Self::next(&self.pages);
        reply.resolve().await
    }

    async fn current_user(&self, token: &str) -> ApiResult<Session> {
        let reply = Self::next(&self.profiles);
        reply.resolve().await.map(|mut session| {
            session.token = token.to_string();
            session
        })
    }
}

/// Flow context wired to a headless store, router and in-memory storage.
pub(crate) struct Harness<B> {
    pub ctx: FlowContext<B>,
    pub store: Store,
    pub router: Router,
    pub storage: Arc<MemoryStorage>,
}

impl<B: Backend> Harness<B> {
    pub fn new(backend: B) -> Self {
        let store = Store::default();
        let router = Router::default();
        let storage = Arc::new(MemoryStorage::new());
        let ctx = FlowContext::new(
            backend,
            Arc::new(store.clone()),
            Arc::new(router.clone()),
            Arc::clone(&storage) as Arc<dyn Storage>,
        );
        Self {
            ctx,
            store,
            router,
            storage,
        }
    }
}

pub(crate) fn session(username: &str, token: &str) -> Session {
    Session {
        id: 1,
        username: username.to_string(),
        email: format!("{username}@x.dummyjson.com"),
        first_name: "Emily".to_string(),
        last_name: "Johnson".to_string(),
        gender: "female".to_string(),
        image: String::new(),
        token: token.to_string(),
        refresh_token: "refresh".to_string(),
    }
}

pub(crate) fn record(id: u64, first: &str, last: &str, age: u32) -> UserRecord {
    UserRecord {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: String::new(),
        username: first.to_lowercase(),
        phone: String::new(),
        image: String::new(),
        age,
        gender: String::new(),
    }
}

pub(crate) fn page(users: Vec<UserRecord>, total: usize) -> UsersPage {
    let limit = users.len();
    UsersPage {
        users,
        total,
        skip: 0,
        limit,
    }
}

/// Yields to the scheduler until `cond` holds.
pub(crate) async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}
