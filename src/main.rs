#[tokio::main]
async fn main() {
    // Exit explicitly: a pending stdin read would otherwise hold the runtime open.
    let code = match tetris_client::run_with_config().await {
        Ok(_) => 0,
        Err(_) => 1,
    };
    std::process::exit(code);
}
