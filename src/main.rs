use anyhow::Result;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = quillpost::config::init_config();

    // Guard must stay alive so buffered log lines are flushed on exit
    let _logging_guard = quillpost::system::init_logging(config);

    quillpost::runtime::server::run_server().await
}
