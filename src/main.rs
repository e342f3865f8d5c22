#[tokio::main]
async fn main() -> anyhow::Result<()> {
    battery_predictor_lib::run().await
}
