#[tokio::main]
async fn main() {
    if let Err(e) = digievent_backend::run().await {
        eprintln!("digievent-backend failed: {}", e);
        std::process::exit(1);
    }
}
