///
/// Build a `Chain` from a list of middleware.
///
/// ```
/// use gauntlet::{chain, MiddlewareResult, Next};
///
/// async fn passthrough(context: u32, next: Next<u32>) -> MiddlewareResult<u32> {
///     next.run(context).await
/// }
///
/// let chain = chain![passthrough, passthrough];
/// assert_eq!(chain.len(), 2);
/// ```
///
#[macro_export]
macro_rules! chain {
    ($($middleware:expr),+ $(,)?) => {
        $crate::Chain::new()$(.middleware($middleware))+
    };
}
