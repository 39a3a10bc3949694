#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pomwalk_lib::main().await
}
