#[tokio::main]
async fn main() {
    if let Err(e) = taskboard_lib::run().await {
        tracing::error!(error = %e, "Taskboard exited with error");
        eprintln!("taskboard: {}", e);
        std::process::exit(1);
    }
}
