use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trip_time::domain::TripRequest;
use trip_time::service::{ServiceConfig, ServiceState, create_router};
use trip_time::soap::{SoapConfig, TripTimeClient};

#[derive(Parser)]
#[command(name = "trip-time", version, about = "Electric vehicle trip-time SOAP service and client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the SOAP service (TRIP_TIME_HOST / TRIP_TIME_PORT)
    Serve,

    /// Ask the service at TRIP_TIME_ENDPOINT for a trip time
    Compute {
        /// Trip distance in km
        #[arg(long)]
        distance: f64,
        /// Average speed in km/h
        #[arg(long)]
        speed: f64,
        /// Vehicle range in km
        #[arg(long)]
        range: f64,
        /// Duration of one recharge in minutes
        #[arg(long, default_value_t = 0.0)]
        recharge: f64,
        /// Print the result object as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether the service at TRIP_TIME_ENDPOINT is reachable
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve => {
            serve(ServiceConfig::from_env()).await;
            ExitCode::SUCCESS
        }
        Command::Compute {
            distance,
            speed,
            range,
            recharge,
            json,
        } => {
            let request = TripRequest::new(distance, speed, range, recharge);
            compute(SoapConfig::from_env(), &request, json).await
        }
        Command::Check => check(SoapConfig::from_env()).await,
    }
}

async fn serve(config: ServiceConfig) {
    let addr = config.bind_addr();
    let location = config.location();

    let state = ServiceState::new(config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));

    println!("Electric vehicle trip-time service listening on {location}");
    println!();
    println!("Endpoints:");
    println!("  GET  /?wsdl  - Service description");
    println!("  POST /       - SOAP calls (calculerTempsTrajet, calculerTempsTrajetDetaillee)");

    axum::serve(listener, app).await.unwrap();
}

async fn compute(config: SoapConfig, request: &TripRequest, json: bool) -> ExitCode {
    let client = match TripTimeClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create client: {e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        let result = client.compute_trip_time(request).await;
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to serialize result: {e}");
                return ExitCode::FAILURE;
            }
        }
        return if result.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match client.try_compute_trip_time(request).await {
        Ok(trip) => {
            println!("{}", trip.summary());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn check(config: SoapConfig) -> ExitCode {
    let endpoint = config.endpoint.clone();
    let reachable = match TripTimeClient::new(config) {
        Ok(client) => client.check_service().await,
        Err(_) => false,
    };

    if reachable {
        println!("Service available at {endpoint}");
        ExitCode::SUCCESS
    } else {
        println!("Service unavailable at {endpoint}");
        ExitCode::FAILURE
    }
}
