use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::monitoring::events;

use super::quote::Quote;
use super::quoter::Quoter;
use super::request::QuoteRequest;
use super::{EngineError, EngineResult};

/// A quote tagged with its position in dispatch order.
#[derive(Debug, Clone)]
pub struct DispatchedQuote {
    pub request_index: usize,
    pub quoter_index: usize,
    pub quoter: &'static str,
    pub quote: Quote,
}

/// 对每个 (请求, 报价器) 组合并发发起报价，单个任务失败只影响自身。
#[derive(Clone)]
pub struct QuoteDispatcher {
    quoters: Vec<Arc<dyn Quoter>>,
}

impl QuoteDispatcher {
    pub fn new(quoters: Vec<Arc<dyn Quoter>>) -> Self {
        Self { quoters }
    }

    pub fn quoter_names(&self) -> Vec<&'static str> {
        self.quoters.iter().map(|quoter| quoter.name()).collect()
    }

    /// Results come back sorted by request order, then quoter registration order.
    pub async fn dispatch(
        &self,
        requests: &[QuoteRequest],
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<DispatchedQuote>> {
        let mut join_set = JoinSet::new();
        for (request_index, request) in requests.iter().enumerate() {
            for (quoter_index, quoter) in self.quoters.iter().enumerate() {
                if quoter.routing_type() != request.routing_type() {
                    continue;
                }
                let quoter = Arc::clone(quoter);
                let request = request.clone();
                join_set.spawn(async move {
                    let quote = quoter.quote(&request).await;
                    events::dispatch_outcome(quoter.name(), request.routing_type(), quote.is_some());
                    (request_index, quoter_index, quoter.name(), quote)
                });
            }
        }

        let spawned = join_set.len();
        debug!(
            target: "engine::dispatcher",
            requests = requests.len(),
            tasks = spawned,
            "报价任务已派发"
        );

        let mut collected = Vec::with_capacity(spawned);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    join_set.abort_all();
                    warn!(
                        target: "engine::dispatcher",
                        pending = join_set.len(),
                        "报价调用被取消，终止未完成任务"
                    );
                    return Err(EngineError::Cancelled);
                }
                next = join_set.join_next() => match next {
                    None => break,
                    Some(Ok((request_index, quoter_index, quoter, quote))) => {
                        if let Some(quote) = quote {
                            collected.push(DispatchedQuote {
                                request_index,
                                quoter_index,
                                quoter,
                                quote,
                            });
                        }
                    }
                    Some(Err(join_err)) => {
                        warn!(
                            target: "engine::dispatcher",
                            error = %join_err,
                            panicked = join_err.is_panic(),
                            "报价任务异常退出，按无报价处理"
                        );
                    }
                },
            }
        }

        collected.sort_by_key(|dispatched| (dispatched.request_index, dispatched.quoter_index));
        debug!(
            target: "engine::dispatcher",
            tasks = spawned,
            quotes = collected.len(),
            "报价任务全部完成"
        );
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::quote::classic::fixtures::classic_quote;
    use crate::engine::quote::dutch::fixtures::dutch_quote;
    use crate::engine::quoter::fakes::{Behavior, FakeQuoter};
    use crate::engine::request::fixtures;
    use crate::engine::types::{RoutingType, TradeType};

    fn classic_request() -> QuoteRequest {
        fixtures::classic(TradeType::ExactInput, 1_000).into()
    }

    fn classic(amount_out: u64) -> Quote {
        classic_quote(TradeType::ExactInput, 1_000, amount_out, 10, 1).into()
    }

    #[tokio::test]
    async fn one_failing_quoter_does_not_affect_others() {
        let dispatcher = QuoteDispatcher::new(vec![
            Arc::new(FakeQuoter::new("a", RoutingType::Classic, Behavior::Respond(classic(1)))),
            Arc::new(FakeQuoter::new("b", RoutingType::Classic, Behavior::Fail)),
            Arc::new(FakeQuoter::new("c", RoutingType::Classic, Behavior::Respond(classic(3)))),
        ]);
        let results = dispatcher
            .dispatch(&[classic_request()], &CancellationToken::new())
            .await
            .unwrap();
        let names: Vec<_> = results.iter().map(|d| d.quoter).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn panicking_quoter_resolves_to_no_quote() {
        let dispatcher = QuoteDispatcher::new(vec![
            Arc::new(FakeQuoter::new("boom", RoutingType::Classic, Behavior::Panic)),
            Arc::new(FakeQuoter::new("ok", RoutingType::Classic, Behavior::Respond(classic(2)))),
        ]);
        let results = dispatcher
            .dispatch(&[classic_request()], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].quoter, "ok");
    }

    #[tokio::test]
    async fn quoters_only_see_their_routing_type() {
        let dutch = dutch_quote(TradeType::ExactInput, 1_000, 2_000, 50, None);
        let dispatcher = QuoteDispatcher::new(vec![
            Arc::new(FakeQuoter::new("classic", RoutingType::Classic, Behavior::Respond(classic(5)))),
            Arc::new(FakeQuoter::new(
                "dutch",
                RoutingType::DutchLimit,
                Behavior::Respond(dutch.into()),
            )),
        ]);
        let requests = vec![
            fixtures::dutch(TradeType::ExactInput, 1_000, 50).into(),
            classic_request(),
        ];
        let results = dispatcher
            .dispatch(&requests, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!((results[0].request_index, results[0].quoter), (0, "dutch"));
        assert_eq!((results[1].request_index, results[1].quoter), (1, "classic"));
    }

    #[tokio::test]
    async fn completion_order_does_not_change_result_order() {
        let dispatcher = QuoteDispatcher::new(vec![
            Arc::new(
                FakeQuoter::new("slow", RoutingType::Classic, Behavior::Respond(classic(1)))
                    .with_delay(Duration::from_millis(30)),
            ),
            Arc::new(FakeQuoter::new("fast", RoutingType::Classic, Behavior::Respond(classic(2)))),
        ]);
        let results = dispatcher
            .dispatch(&[classic_request()], &CancellationToken::new())
            .await
            .unwrap();
        let names: Vec<_> = results.iter().map(|d| d.quoter).collect();
        assert_eq!(names, vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn cancellation_aborts_outstanding_tasks() {
        let dispatcher = QuoteDispatcher::new(vec![
            Arc::new(FakeQuoter::new("hang", RoutingType::Classic, Behavior::Hang)),
            Arc::new(FakeQuoter::new("ok", RoutingType::Classic, Behavior::Respond(classic(2)))),
        ]);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            dispatcher.dispatch(&[classic_request()], &cancel),
        )
        .await
        .expect("dispatch returns once cancelled");
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }

    #[tokio::test]
    async fn empty_request_set_yields_nothing() {
        let dispatcher = QuoteDispatcher::new(vec![Arc::new(FakeQuoter::new(
            "a",
            RoutingType::Classic,
            Behavior::Respond(classic(1)),
        ))]);
        let results = dispatcher.dispatch(&[], &CancellationToken::new()).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(dispatcher.quoter_names(), vec!["a"]);
    }
}
