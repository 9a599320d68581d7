use std::sync::Arc;
use std::time::{Duration, Instant};

use bakery_core::{AgentError, HoursTable, MenuCatalog, Response, Source};
use bakery_resolver::{not_available, resolve};
use tracing::{debug, info, warn};

use crate::Delegate;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Answers bakery questions: the delegate first, the resolver when the
/// delegate is missing or fails.
#[derive(Clone)]
pub struct QueryService {
    hours: Arc<HoursTable>,
    menu: Arc<MenuCatalog>,
    delegate: Option<Arc<dyn Delegate>>,
    timeout: Duration,
}

impl QueryService {
    /// Resolver-only service.
    pub fn new(hours: HoursTable, menu: MenuCatalog) -> Self {
        Self {
            hours: Arc::new(hours),
            menu: Arc::new(menu),
            delegate: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Adds a delegate tried before the resolver, bounded by `timeout`.
    pub fn with_delegate(mut self, delegate: Arc<dyn Delegate>, timeout: Duration) -> Self {
        self.delegate = Some(delegate);
        self.timeout = timeout;
        self
    }

    /// Answers a free-text question.
    ///
    /// A successful delegate answer is tagged `mcp`. On any delegate failure
    /// the resolver's text is returned tagged `fallback`. Without a delegate
    /// the resolver's answer is returned unchanged.
    pub async fn answer(&self, query: &str) -> Response {
        let Some(delegate) = &self.delegate else {
            return resolve(query, &self.hours, &self.menu);
        };

        match self.ask(delegate.as_ref(), query).await {
            Ok(text) => Response::new(text, Source::Mcp),
            Err(e) => {
                warn!("{} failed, using resolver: {}", delegate.name(), e);
                resolve(query, &self.hours, &self.menu).with_source(Source::Fallback)
            }
        }
    }

    /// Answers the `item`/`day` form of a check.
    ///
    /// With a day this is the question "Can I order <item> on <day>?".
    /// Without one it is a [`quick_check`](Self::quick_check).
    pub async fn check_item(&self, item: &str, day: Option<&str>) -> Response {
        match day.map(str::trim).filter(|d| !d.is_empty()) {
            Some(day) => self.answer(&format!("Can I order {} on {}?", item.trim(), day)).await,
            None => self.quick_check(item).await,
        }
    }

    /// Bare item lookup: a menu item is confirmed directly, anything else is
    /// put to the delegate before being reported unavailable.
    pub async fn quick_check(&self, item: &str) -> Response {
        if let Some(found) = bakery_resolver::quick_check(item, &self.menu) {
            return found;
        }

        let Some(delegate) = &self.delegate else {
            return not_available(item, &self.menu);
        };

        match self.ask(delegate.as_ref(), &format!("Can I order a {}?", item.trim())).await {
            Ok(text) => Response::new(text, Source::Mcp),
            Err(e) => {
                warn!("{} failed, using menu lookup: {}", delegate.name(), e);
                not_available(item, &self.menu)
            }
        }
    }

    /// Calls the delegate within the timeout and rejects blank answers.
    async fn ask(&self, delegate: &dyn Delegate, query: &str) -> Result<String, AgentError> {
        let start = Instant::now();
        debug!("Delegating to {}: {}", delegate.name(), query);

        let answer = tokio::time::timeout(self.timeout, delegate.answer(query))
            .await
            .map_err(|_| AgentError::Timeout(self.timeout.as_millis() as u64))??;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AgentError::EmptyAnswer);
        }

        info!("{} answered in {:?}", delegate.name(), start.elapsed());
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    enum Stub {
        Answers(&'static str),
        Fails,
        Hangs,
    }

    #[async_trait]
    impl Delegate for Stub {
        fn name(&self) -> &str {
            "stub"
        }

        async fn answer(&self, _query: &str) -> Result<String, AgentError> {
            match self {
                Stub::Answers(text) => Ok(text.to_string()),
                Stub::Fails => Err(AgentError::LlmError("connection refused".into())),
                Stub::Hangs => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("too late".into())
                }
            }
        }
    }

    fn service(stub: Option<Stub>) -> QueryService {
        let base = QueryService::new(HoursTable::default(), MenuCatalog::default());
        match stub {
            Some(stub) => base.with_delegate(Arc::new(stub), Duration::from_millis(50)),
            None => base,
        }
    }

    #[tokio::test]
    async fn without_delegate_resolver_answers_as_is() {
        let r = service(None).answer("Can I order a croissant on Monday?").await;
        assert_eq!(r.source, Source::Direct);
        assert!(r.text.contains("Monday"));
    }

    #[tokio::test]
    async fn delegate_answer_is_tagged_mcp() {
        let r = service(Some(Stub::Answers(" YES, we're open. \n")))
            .answer("Can I order a croissant on Monday?")
            .await;
        assert_eq!(r, Response::new("YES, we're open.", Source::Mcp));
    }

    #[tokio::test]
    async fn failures_fall_back_to_resolver() {
        for stub in [Stub::Fails, Stub::Hangs, Stub::Answers("   ")] {
            let r = service(Some(stub)).answer("Can I order a cake on Sunday?").await;
            assert_eq!(r.source, Source::Fallback);
            assert!(r.text.contains("closed on Sunday"), "{}", r.text);
        }
    }

    #[tokio::test]
    async fn known_item_skips_delegate() {
        let r = service(Some(Stub::Fails)).quick_check("Croissant").await;
        assert_eq!(r, Response::direct("Yes, we have croissant available in our bakery!"));
    }

    #[tokio::test]
    async fn unknown_item_asks_delegate_then_reports_unavailable() {
        let r = service(Some(Stub::Answers("NO, not on the menu."))).check_item("scone", None).await;
        assert_eq!(r.source, Source::Mcp);

        let r = service(Some(Stub::Hangs)).check_item("scone", None).await;
        assert_eq!(r.source, Source::Fallback);
        assert!(r.text.starts_with("Sorry, we don't have 'scone' available."));
    }

    #[tokio::test]
    async fn item_with_day_becomes_question() {
        let r = service(None).check_item("pie", Some("Saturday")).await;
        assert!(r.text.contains("8 AM to 4 PM"), "{}", r.text);
    }
}
