//! Client-side request deadline.
//!
//! Native builds get their timeout from the reqwest client builder. Browser
//! fetch has no such knob, so on wasm every call is raced against a
//! `setTimeout` promise instead.

use crate::error::ApiError;
use futures::future::{select, Either};
use futures::pin_mut;
use std::future::Future;
use std::time::Duration;

/// Run `work`, failing with [`ApiError::Timeout`] if `timer` fires first.
///
/// When both are ready on the same poll the work wins.
pub async fn race<T, W, S>(work: W, timer: S, timeout_ms: u64) -> Result<T, ApiError>
where
    W: Future<Output = Result<T, ApiError>>,
    S: Future<Output = ()>,
{
    pin_mut!(work, timer);
    match select(work, timer).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => {
            log::warn!("request exceeded {}ms", timeout_ms);
            Err(ApiError::Timeout(timeout_ms))
        }
    }
}

/// `work` bounded by `timeout` on every target.
///
/// A timeout reported by the transport itself is relabelled with `timeout`,
/// so the error names the configured limit whichever side fired.
pub async fn within<T, W>(timeout: Duration, work: W) -> Result<T, ApiError>
where
    W: Future<Output = Result<T, ApiError>>,
{
    let ms = timeout.as_millis() as u64;
    race(work, sleep(ms), ms).await.map_err(|e| match e {
        ApiError::Timeout(_) => ApiError::Timeout(ms),
        e => e,
    })
}

#[cfg(target_arch = "wasm32")]
async fn sleep(ms: u64) {
    use wasm_bindgen_futures::JsFuture;

    let Some(window) = web_sys::window() else {
        return futures::future::pending().await;
    };
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let ms = i32::try_from(ms).unwrap_or(i32::MAX);
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .is_err()
        {
            log::warn!("setTimeout unavailable, request has no deadline");
        }
    });
    if JsFuture::from(promise).await.is_err() {
        futures::future::pending::<()>().await;
    }
}

/// The reqwest client enforces the deadline itself on native targets.
#[cfg(not(target_arch = "wasm32"))]
async fn sleep(_ms: u64) {
    futures::future::pending::<()>().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn test_expired_timer_fails_as_timeout() {
        let outcome = block_on(race(pending::<Result<u8, ApiError>>(), ready(()), 30_000));
        assert_eq!(outcome, Err(ApiError::Timeout(30_000)));
        assert_eq!(
            outcome.unwrap_err().to_string(),
            "timeout of 30000ms exceeded"
        );
    }

    #[test]
    fn test_finished_work_beats_timer() {
        let outcome = block_on(race(ready(Ok::<_, ApiError>(7)), ready(()), 30_000));
        assert_eq!(outcome, Ok(7));
    }

    #[test]
    fn test_work_errors_pass_through() {
        let failed = ready(Err::<u8, _>(ApiError::Transport("Network Error".into())));
        let outcome = block_on(race(failed, pending(), 30_000));
        assert_eq!(outcome, Err(ApiError::Transport("Network Error".into())));
    }

    #[test]
    fn test_transport_timeout_names_configured_limit() {
        let timed_out = ready(Err::<u8, _>(ApiError::Timeout(30_000)));
        let outcome = block_on(within(Duration::from_millis(250), timed_out));
        assert_eq!(outcome, Err(ApiError::Timeout(250)));
    }
}
