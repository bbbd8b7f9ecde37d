mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Connections are served one at a time, a single thread is all it takes
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::current_dir()?;
    let server = server::Server::start(&cfg, &root)?;

    let shutdown = server::ShutdownSignal::new();
    server::signal::listen(&shutdown)?;

    logger::log_server_start(&server.local_addr(), server.root());
    server.serve_forever(&shutdown).await;
    Ok(())
}
