//! Exception injection in front of a handler
//!
//! When the active record is enabled and the activation gate fires, the
//! wrapper returns an injected error without calling the handler. Otherwise
//! the handler is called as if unwrapped.

use std::sync::Arc;

use async_trait::async_trait;
use chaos_domain::ExceptionKind;
use tower::Layer;
use tracing::info;

use super::{ActivationGate, ConfigResolver};
use crate::{error::ApplicationError, ports::Handler};

/// Layer that wraps handlers in an [`ExceptionInjector`]
///
/// Without overrides the injected error is [`ExceptionKind::Generic`]
/// carrying the record's `exception_msg`.
#[derive(Debug, Clone)]
pub struct ExceptionLayer {
    resolver: Arc<ConfigResolver>,
    kind: Option<ExceptionKind>,
    message: Option<String>,
    gate: ActivationGate,
}

impl ExceptionLayer {
    /// Create a layer that takes everything from the remote record
    pub fn new(resolver: Arc<ConfigResolver>) -> Self {
        Self {
            resolver,
            kind: None,
            message: None,
            gate: ActivationGate::new(),
        }
    }

    /// Raise errors of `kind` instead of the generic kind
    #[must_use]
    pub const fn with_kind(mut self, kind: ExceptionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Raise errors carrying `message` instead of the record's message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<H> Layer<H> for ExceptionLayer {
    type Service = ExceptionInjector<H>;

    fn layer(&self, inner: H) -> Self::Service {
        ExceptionInjector {
            inner,
            resolver: Arc::clone(&self.resolver),
            kind: self.kind,
            message: self.message.clone(),
            gate: self.gate,
        }
    }
}

/// Handler wrapper that may fail invocations before they run
#[derive(Debug, Clone)]
pub struct ExceptionInjector<H> {
    inner: H,
    resolver: Arc<ConfigResolver>,
    kind: Option<ExceptionKind>,
    message: Option<String>,
    gate: ActivationGate,
}

impl<H> ExceptionInjector<H> {
    /// Wrap `handler` using only the remote configuration
    pub fn wrap(resolver: Arc<ConfigResolver>, handler: H) -> Self {
        ExceptionLayer::new(resolver).layer(handler)
    }

    /// Kind override supplied at wrap time, if any
    pub const fn kind_override(&self) -> Option<ExceptionKind> {
        self.kind
    }

    /// Message override supplied at wrap time, if any
    pub fn message_override(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The wrapped handler
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

#[async_trait]
impl<H, Ev, Ctx> Handler<Ev, Ctx> for ExceptionInjector<H>
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
        let (configured_msg, rate) = self.resolver.resolve_exception_msg().await?;

        if !self.gate.should_fire(rate) {
            return self.inner.call(event, context).await;
        }

        let kind = self.kind.unwrap_or_default();
        let message = self.message.clone().unwrap_or(configured_msg);
        info!(
            parameter = %self.resolver.parameter(),
            handler = %self.inner.name(),
            kind = %kind,
            rate,
            "Injecting exception"
        );

        Err(ApplicationError::from(kind.raise(message)).into())
    }
}
