use std::boxed::Box;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use futures::future;

use crate::core::errors::ChainError;

pub type MiddlewareResult<C> = Result<C, ChainError>;
pub type MiddlewareReturnValue<C> = Pin<Box<dyn Future<Output = MiddlewareResult<C>> + Send>>;

///
/// A single handler in a chain. A middleware receives the context and a `Next`
/// continuation; it may run code before and after delegating to the rest of
/// the chain via `next.run(context)`, or skip the delegation entirely to
/// short-circuit everything after it.
///
/// Plain async fns and closures of the shape
/// `Fn(C, Next<C>) -> impl Future<Output = MiddlewareResult<C>>` implement
/// this trait automatically.
///
pub trait Middleware<C>: Send + Sync {
    fn handle(&self, context: C, next: Next<C>) -> MiddlewareReturnValue<C>;
}

impl<C, F, Fut> Middleware<C> for F
where
    F: Fn(C, Next<C>) -> Fut + Send + Sync,
    Fut: Future<Output = MiddlewareResult<C>> + Send + 'static,
{
    fn handle(&self, context: C, next: Next<C>) -> MiddlewareReturnValue<C> {
        Box::pin((self)(context, next))
    }
}

pub(crate) type DynMiddleware<C> = Arc<dyn Middleware<C>>;

const STATUS_PENDING: u8 = 0;
const STATUS_INVOKED: u8 = 1;
const STATUS_EXHAUSTED: u8 = 2;

///
/// Lifecycle of a single `Next` instance. `Invoked` means the continuation has
/// delegated onward; `Exhausted` means it fired as the no-op past the last
/// middleware. Either way a second invocation is rejected.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStatus {
    Pending,
    Invoked,
    Exhausted,
}

///
/// The continuation handed to each middleware. Holds an immutable view of the
/// chain (shared stack plus a position) rather than a shrinking list, so
/// concurrent runs over the same chain never see each other's progress. Each
/// instance may be run at most once; a second invocation resolves to
/// `ChainError::CalledMoreThanOnce`.
///
pub struct Next<C> {
    stack: Arc<[DynMiddleware<C>]>,
    position: usize,
    outer: Option<Arc<Next<C>>>,
    status: AtomicU8,
}

impl<C: 'static + Send> Next<C> {
    pub(crate) fn root(stack: Arc<[DynMiddleware<C>]>) -> Self {
        Next::new(stack, 0, None)
    }

    pub(crate) fn new(
        stack: Arc<[DynMiddleware<C>]>,
        position: usize,
        outer: Option<Arc<Next<C>>>,
    ) -> Self {
        Next {
            stack,
            position,
            outer,
            status: AtomicU8::new(STATUS_PENDING),
        }
    }

    pub fn status(&self) -> NextStatus {
        match self.status.load(Ordering::Acquire) {
            STATUS_INVOKED => NextStatus::Invoked,
            STATUS_EXHAUSTED => NextStatus::Exhausted,
            _ => NextStatus::Pending,
        }
    }

    ///
    /// Run the remainder of the chain. Completes once every middleware from
    /// this position on has resolved, or rejects with the first error raised.
    /// Past the last middleware this is a no-op that completes immediately,
    /// unless the chain was spliced into an enclosing one, in which case
    /// control passes to the enclosing continuation.
    ///
    pub fn run(&self, context: C) -> MiddlewareReturnValue<C> {
        let target = if self.position < self.stack.len() || self.outer.is_some() {
            STATUS_INVOKED
        } else {
            STATUS_EXHAUSTED
        };

        if self
            .status
            .compare_exchange(STATUS_PENDING, target, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(
                "a middleware invoked `next` more than once at chain position {}",
                self.position
            );
            return Box::pin(future::err::<C, _>(ChainError::CalledMoreThanOnce));
        }

        match self.stack.get(self.position) {
            Some(middleware) => {
                let next = Next::new(self.stack.clone(), self.position + 1, self.outer.clone());
                middleware.handle(context, next)
            }
            None => match self.outer.as_ref() {
                Some(outer) => outer.run(context),
                None => {
                    trace!("chain exhausted at position {}", self.position);
                    Box::pin(future::ok(context))
                }
            },
        }
    }
}
