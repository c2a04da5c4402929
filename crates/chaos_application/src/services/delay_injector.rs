//! Delay injection in front of a handler
//!
//! When the active record is enabled and the activation gate fires, the
//! wrapper either pauses for the effective delay before calling the handler,
//! or, when the effective delay is zero, times the handler and reports how
//! long it took. The handler's result is always returned unchanged.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tower::Layer;
use tracing::info;

use super::{ActivationGate, ConfigResolver};
use crate::{
    error::ApplicationError,
    ports::{Handler, InjectionReporter, StdoutReporter},
};

/// Layer that wraps handlers in a [`DelayInjector`]
///
/// `DelayLayer::new(resolver)` uses the delay from the remote record;
/// `.with_delay(ms)` overrides it for every handler the layer wraps.
#[derive(Debug, Clone)]
pub struct DelayLayer {
    resolver: Arc<ConfigResolver>,
    delay_ms: Option<u64>,
    reporter: Arc<dyn InjectionReporter>,
    gate: ActivationGate,
}

impl DelayLayer {
    /// Create a layer that takes the delay from the remote record
    pub fn new(resolver: Arc<ConfigResolver>) -> Self {
        Self {
            resolver,
            delay_ms: None,
            reporter: Arc::new(StdoutReporter::new()),
            gate: ActivationGate::new(),
        }
    }

    /// Override the remote delay; `0` switches to timing-only mode
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Send informational lines to `reporter` instead of stdout
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn InjectionReporter>) -> Self {
        self.reporter = reporter;
        self
    }
}

impl<H> Layer<H> for DelayLayer {
    type Service = DelayInjector<H>;

    fn layer(&self, inner: H) -> Self::Service {
        DelayInjector {
            inner,
            resolver: Arc::clone(&self.resolver),
            delay_ms: self.delay_ms,
            reporter: Arc::clone(&self.reporter),
            gate: self.gate,
        }
    }
}

/// Handler wrapper that may delay invocations
#[derive(Debug, Clone)]
pub struct DelayInjector<H> {
    inner: H,
    resolver: Arc<ConfigResolver>,
    delay_ms: Option<u64>,
    reporter: Arc<dyn InjectionReporter>,
    gate: ActivationGate,
}

impl<H> DelayInjector<H> {
    /// Wrap `handler` using only the remote configuration
    pub fn wrap(resolver: Arc<ConfigResolver>, handler: H) -> Self {
        DelayLayer::new(resolver).layer(handler)
    }

    /// Delay override supplied at wrap time, if any
    pub const fn delay_override(&self) -> Option<u64> {
        self.delay_ms
    }

    /// The wrapped handler
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

#[async_trait]
impl<H, Ev, Ctx> Handler<Ev, Ctx> for DelayInjector<H>
where
    H: Handler<Ev, Ctx>,
    H::Error: From<ApplicationError>,
    Ev: Send + 'static,
    Ctx: Send + 'static,
{
    type Output = H::Output;
    type Error = H::Error;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, event: Ev, context: Ctx) -> Result<Self::Output, Self::Error> {
        let (configured_delay, rate) = self.resolver.resolve_delay().await?;

        // A disabled record resolves to rate 0, which never fires.
        if !self.gate.should_fire(rate) {
            return self.inner.call(event, context).await;
        }

        let delay_ms = self.delay_ms.unwrap_or(configured_delay);
        if delay_ms > 0 {
            info!(
                parameter = %self.resolver.parameter(),
                handler = %self.inner.name(),
                delay_ms,
                rate,
                "Injecting delay"
            );
            self.reporter.report(&format!(
                "Injecting {delay_ms} of delay with a rate of {rate}"
            ));
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            return self.inner.call(event, context).await;
        }

        let start = Instant::now();
        let result = self.inner.call(event, context).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.reporter.report(&format!(
            "Added {elapsed_ms:.2}ms to {}",
            self.inner.name()
        ));
        result
    }
}
