use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request. Wrappers implement this too so they can
/// rewrite the request before handing it to an inner client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
