#[tokio::main]
async fn main() -> std::io::Result<()> {
    feed_server::run_with_config().await
}
