use dotenvy::dotenv;

use shortlnk::{config, runtime, system};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::init_config();
    let _log_guard = system::logging::init_logging(config);

    runtime::modes::server::run_server().await
}
