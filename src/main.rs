use std::sync::Arc;

use clap::{Arg, Command};
use tracing_subscriber::EnvFilter;

use message_board::schema::schema;
use message_board::server::{app, AppState};
use message_board::store::Store;

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("message_board=debug,tower_http=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let matches = Command::new("message_board")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .env("PORT")
                .value_parser(clap::value_parser!(u16))
                .default_value("8000"),
        )
        .arg(
            Arg::new("viewer")
                .long("viewer")
                .env("VIEWER_ID")
                .default_value("1"),
        )
        .get_matches();
    let port = *matches.get_one::<u16>("port").expect("port has a default");
    let viewer_id = matches.get_one::<String>("viewer").map(ToOwned::to_owned);

    let store = Arc::new(Store::demo());
    let state = AppState::new(schema(), store, viewer_id);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "graphql server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
