use epic_prioritizer_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("epic-prioritizer: {err}");
        std::process::exit(1);
    }
}
