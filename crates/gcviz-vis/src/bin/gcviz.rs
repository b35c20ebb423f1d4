//! GC Visualizer Server
//!
//! Serve a stepwise garbage-collection session over HTTP and WebSocket.
//!
//! Usage: `gcviz [port] [algorithm]`

use gcviz_collector::Algorithm;
use gcviz_vis::{ServerConfig, Simulation, SimulationConfig, VisServer};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gcviz=info,gcviz_vis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = SimulationConfig::from_env()?;
    let mut server_config = ServerConfig::from_env()?;

    // Command line args override the environment
    let args: Vec<String> = env::args().collect();
    if let Some(port) = args.get(1) {
        server_config = ServerConfig::parse_port(port)?;
    }
    if let Some(name) = args.get(2) {
        config.algorithm = name.parse::<Algorithm>()?;
    }

    println!("GC Visualizer");
    println!("=============");
    println!();
    println!("  Collector: {}", config.algorithm.label());
    println!("  Autoplay:  every {} ms", config.tick_interval.as_millis());
    println!();
    println!("Starting server on http://localhost:{}", server_config.port);
    println!("Fetch /api/frame or connect to /ws to drive the session.");
    println!();

    let server = VisServer::new(Simulation::new(config));
    server.serve(server_config.port).await?;

    Ok(())
}
