use glib::MainContext;
use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

pub fn glib_channel<T: Send + 'static>() -> (glib::Sender<T>, glib::Receiver<T>) {
    MainContext::channel(glib::Priority::DEFAULT)
}

/// Run a future on the Tokio runtime and hand its result to the GTK main
/// loop. If the receiving view is gone by the time the result arrives, it
/// lands in a dead channel and is dropped.
pub fn run_async_to_main<T, E, Fut>(fut: Fut) -> glib::Receiver<Result<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: std::future::Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = glib_channel::<Result<T, E>>();
    spawn_async(async move {
        let res = fut.await;
        let _ = tx.send(res);
    });
    rx
}

/// The backend runs plain HTTP in local dev, so that is the scheme we
/// assume when none is given.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Derive a stable user id from a display name: "Ana Lopez" -> "ana-lopez".
pub fn slug_id(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_defaults_to_http() {
        assert_eq!(normalize_url("localhost:8000"), "http://localhost:8000");
        assert_eq!(normalize_url(" https://api.example.com "), "https://api.example.com");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn slug_id_collapses_whitespace() {
        assert_eq!(slug_id("Ana Lopez"), "ana-lopez");
        assert_eq!(slug_id("  Severin "), "severin");
        assert_eq!(slug_id("J  R  Hartley"), "j-r-hartley");
    }
}
