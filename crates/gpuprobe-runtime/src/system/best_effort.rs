//! The best-effort combinator shared by every capability sub-check.

use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::debug;

use crate::panic::panic_message;

/// Run `op`, turning both errors and panics into a described `Err(String)`.
///
/// The message is prefixed with `description`. A panic raised while
/// building the future is caught as well as one raised while polling it.
pub async fn best_effort<T, E, F, Fut>(description: &str, op: F) -> Result<T, String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let outcome = AssertUnwindSafe(async move { op().await })
        .catch_unwind()
        .await;

    let message = match outcome {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => format!("{description}: {err}"),
        Err(payload) => format!("{description}: panicked: {}", panic_message(&*payload)),
    };
    debug!(check = description, error = %message, "Best-effort check failed");
    Err(message)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    #[test]
    fn test_success_passes_through() {
        let result = tokio_test::block_on(best_effort("answer", || async {
            Ok::<_, Infallible>(42)
        }));
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_error_is_prefixed() {
        let result: Result<(), String> =
            best_effort("nvidia-smi", || async { Err("not found") }).await;
        assert_eq!(result, Err("nvidia-smi: not found".to_string()));
    }

    #[tokio::test]
    async fn test_panic_while_polling_is_caught() {
        let result: Result<(), String> = best_effort("egl", || async {
            if true {
                panic!("driver exploded");
            }
            Ok::<_, Infallible>(())
        })
        .await;
        assert_eq!(result, Err("egl: panicked: driver exploded".to_string()));
    }

    #[tokio::test]
    async fn test_panic_while_building_is_caught() {
        let result: Result<(), String> = best_effort("devices", || -> std::future::Ready<Result<(), Infallible>> {
            panic!("bad pattern")
        })
        .await;
        assert_eq!(result, Err("devices: panicked: bad pattern".to_string()));
    }
}
