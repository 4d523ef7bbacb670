#[tokio::main]
async fn main() -> anyhow::Result<()> {
    heroreel_lib::run().await
}
