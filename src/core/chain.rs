use std::sync::Arc;

use crate::core::middleware::{
    DynMiddleware, Middleware, MiddlewareReturnValue, Next,
};

///
/// An ordered, immutable sequence of middleware plus the machinery to run it.
/// The middleware list is captured when the chain is built; every call to
/// `run` constructs fresh continuation state over that shared list, so a
/// single chain can drive any number of concurrent runs without one run's
/// position advancing another's.
///
pub struct Chain<C: 'static + Send> {
    stack: Arc<[DynMiddleware<C>]>,
}

impl<C: 'static + Send> Chain<C> {
    pub fn new() -> Self {
        Chain {
            stack: Arc::from(Vec::new()),
        }
    }

    ///
    /// Append a middleware to the end of the chain.
    ///
    pub fn middleware<M: Middleware<C> + 'static>(self, middleware: M) -> Self {
        let mut stack: Vec<DynMiddleware<C>> = self.stack.iter().cloned().collect();
        stack.push(Arc::new(middleware));

        Chain {
            stack: stack.into(),
        }
    }

    ///
    /// Concatenate another chain onto the end of this one.
    ///
    pub fn chain(self, other: Chain<C>) -> Self {
        let mut stack: Vec<DynMiddleware<C>> = self.stack.iter().cloned().collect();
        stack.extend(other.stack.iter().cloned());

        Chain {
            stack: stack.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    ///
    /// Run the chain to completion with the given context. An empty chain
    /// completes immediately. The context is handed back in the completion
    /// value once every middleware that delegated has finished its
    /// post-delegation code, or the first error is handed back instead.
    ///
    pub fn run(&self, context: C) -> MiddlewareReturnValue<C> {
        trace!("running chain of {} middleware", self.stack.len());
        Next::root(self.stack.clone()).run(context)
    }
}

impl<C: 'static + Send> Default for Chain<C> {
    fn default() -> Self {
        Chain::new()
    }
}

impl<C: 'static + Send> Clone for Chain<C> {
    fn clone(&self) -> Self {
        Chain {
            stack: self.stack.clone(),
        }
    }
}

///
/// Collapse a chain into a single middleware so whole chains can be nested
/// inside other chains. Running the composed middleware executes its members
/// in order; once they are exhausted, control passes to the composed
/// middleware's own `next`, which makes `compose(chain![a, b])` followed by
/// `c` indistinguishable from the flat chain `a, b, c`.
///
pub fn compose<C: 'static + Send>(chain: Chain<C>) -> Composed<C> {
    Composed { stack: chain.stack }
}

pub struct Composed<C: 'static + Send> {
    stack: Arc<[DynMiddleware<C>]>,
}

impl<C: 'static + Send> Middleware<C> for Composed<C> {
    fn handle(&self, context: C, next: Next<C>) -> MiddlewareReturnValue<C> {
        let spliced = Next::new(self.stack.clone(), 0, Some(Arc::new(next)));
        spliced.run(context)
    }
}

impl<C: 'static + Send> Clone for Composed<C> {
    fn clone(&self) -> Self {
        Composed {
            stack: self.stack.clone(),
        }
    }
}
