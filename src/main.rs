mod config;
mod error;
mod handlers;
mod middleware;
mod render;
mod router;
mod state;
mod utils;

use std::net::SocketAddr;
use std::process;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help") {
        println!("mamba-web");
        println!("A remote file manager and command executor over HTTP.");
        println!();
        println!("USAGE:");
        println!("    mamba-web [OPTIONS]");
        println!();
        println!("OPTIONS:");
        println!("    --port=<PORT>     Sets the listening port. [env: PORT] [default: 81]");
        println!("    --root=<PATH>     Sets the default root directory. [env: ROOT_DIR]");
        println!("    --user=<NAME>     Sets the basic-auth username. [env: ADMIN_USER] [default: admin]");
        println!("    --pass=<PASS>     Sets the basic-auth password. [env: ADMIN_PASS] [default: a random password]");
        println!();
        println!("    --help            Prints this help information.");
        println!();

        process::exit(0);
    }

    let config = config::Config::load();

    println!("Mamba Web Manager is running");
    println!("  File manager:     http://<server-ip>:{}/list", config.port);
    println!("  Command executor: http://<server-ip>:{}/exec", config.port);
    println!("  Root directory:   {:?}", config.root_dir);

    let state = state::AppState::new(config.clone());
    let app = router::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    println!("Server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = wait_for_ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await;
    }

    println!("Shutdown signal received, stopping server...");
}

async fn wait_for_ctrl_c() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
