use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::dto::blog_dto::BlogSearch;
use crate::dto::vacancy_dto::VacancySearch;
use crate::error::Result;
use crate::models::blog::BlogPost;
use crate::models::vacancy::Vacancy;
use crate::services::notification_service::Notifier;
use crate::services::site_api::{ListOptions, SiteApi};

pub type SearchFuture<R> = Pin<Box<dyn Future<Output = Result<R>> + Send>>;
type Fetcher<Q, R> = Arc<dyn Fn(Q) -> SearchFuture<R> + Send + Sync>;

/// Hands out increasing request numbers and remembers the newest one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Search box behaviour: each input restarts the quiet-period timer, only a
/// timer that runs out issues the fetch, and only the newest fetch's result
/// is published.
pub struct DebouncedSearch<Q, R> {
    quiet_period: Duration,
    fetcher: Fetcher<Q, R>,
    sequencer: Arc<RequestSequencer>,
    timer: Option<JoinHandle<()>>,
    results: Arc<watch::Sender<Option<R>>>,
    notifier: Arc<dyn Notifier>,
    failure_fallback: &'static str,
}

impl<Q, R> DebouncedSearch<Q, R>
where
    Q: Send + 'static,
    R: Send + Sync + 'static,
{
    pub fn new<F, Fut>(
        quiet_period: Duration,
        fetch: F,
        notifier: Arc<dyn Notifier>,
        failure_fallback: &'static str,
    ) -> Self
    where
        F: Fn(Q) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        let (tx, _rx) = watch::channel(None);
        Self {
            quiet_period,
            fetcher: Arc::new(move |query| -> SearchFuture<R> { Box::pin(fetch(query)) }),
            sequencer: Arc::new(RequestSequencer::new()),
            timer: None,
            results: Arc::new(tx),
            notifier,
            failure_fallback,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<R>> {
        self.results.subscribe()
    }

    /// Number of fetches issued so far.
    pub fn issued(&self) -> u64 {
        self.sequencer.latest()
    }

    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Records a new input and restarts the timer.
    pub fn update(&mut self, query: Q) {
        self.cancel();
        let quiet_period = self.quiet_period;
        let issue = self.issuer();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            issue(query);
        }));
    }

    /// Skips the quiet period, e.g. for the first load of a page.
    pub fn fetch_now(&mut self, query: Q) {
        self.cancel();
        (self.issuer())(query);
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn issuer(&self) -> impl FnOnce(Q) + Send + 'static {
        let fetcher = self.fetcher.clone();
        let sequencer = self.sequencer.clone();
        let results = self.results.clone();
        let notifier = self.notifier.clone();
        let fallback = self.failure_fallback;

        move |query| {
            let seq = sequencer.next();
            debug!(seq, "Issuing search");
            let request = fetcher(query);
            // Detached so a later timer never aborts a fetch already in flight.
            tokio::spawn(async move {
                let result = request.await;
                if !sequencer.is_latest(seq) {
                    debug!(seq, latest = sequencer.latest(), "Discarding stale search result");
                    return;
                }
                match result {
                    Ok(value) => {
                        results.send_replace(Some(value));
                    }
                    Err(err) => notifier.error(&err.user_message(fallback)),
                }
            });
        }
    }
}

impl<Q, R: Clone> DebouncedSearch<Q, R> {
    pub fn current(&self) -> Option<R> {
        self.results.borrow().clone()
    }
}

impl<Q, R> Drop for DebouncedSearch<Q, R> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Public vacancy list driven by the keyword and filter inputs.
pub fn vacancy_search(
    api: SiteApi,
    quiet_period: Duration,
    notifier: Arc<dyn Notifier>,
) -> DebouncedSearch<VacancySearch, Vec<Vacancy>> {
    DebouncedSearch::new(
        quiet_period,
        move |search: VacancySearch| {
            let api = api.clone();
            async move { api.list_jobs(&search, ListOptions::default()).await }
        },
        notifier,
        "Could not load jobs with current filters.",
    )
}

/// Public blog list driven by the search box and category pills.
pub fn blog_search(
    api: SiteApi,
    quiet_period: Duration,
    notifier: Arc<dyn Notifier>,
) -> DebouncedSearch<BlogSearch, Vec<BlogPost>> {
    DebouncedSearch::new(
        quiet_period,
        move |search: BlogSearch| {
            let api = api.clone();
            async move { api.blog_posts(&search, ListOptions::default()).await }
        },
        notifier,
        "Failed to load filtered posts.",
    )
}
