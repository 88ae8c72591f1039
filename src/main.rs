#[tokio::main]
async fn main() -> std::io::Result<()> {
    defence_game::run_with_config().await
}
