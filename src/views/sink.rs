/// Destination for buffered view counts.
///
/// `updates` pairs a short hash with the number of views accumulated since
/// the last flush. Errors never reach a request handler; the caller logs
/// them and restores the counts to the buffer.
#[async_trait::async_trait]
pub trait ViewSink: Send + Sync {
    async fn flush_views(&self, updates: Vec<(String, usize)>) -> anyhow::Result<()>;
}
