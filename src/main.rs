use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    gist::setup_logging();
    run(service_fn(gist::api::function_handler)).await
}
