mod v1;

use std::{collections::HashMap, fs, io, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tasklight_api::v1::Task;
use tokio::{sync::Mutex, time};
use uuid::Uuid;

const STORE_INTERVAL: time::Duration = time::Duration::from_secs(300);

#[derive(Parser, Debug)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:7890")]
    bind: SocketAddr,

    /// Path of the task snapshot file.
    #[arg(long, default_value = "data.ron")]
    data_file: PathBuf,

    /// PEM certificate, served over plain TCP when absent.
    #[arg(long, requires = "key")]
    cert: Option<PathBuf>,

    /// PEM private key.
    #[arg(long, requires = "cert")]
    key: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let state = Arc::new(AppState::load(args.data_file)?);

    tokio::spawn({
        let state = state.clone();
        async move {
            loop {
                time::sleep(STORE_INTERVAL).await;
                if let Err(err) = state.store().await {
                    tracing::error!("Failed to store data: {:?}", err);
                }
            }
        }
    });

    let app = Router::new()
        .nest("/api/v1", v1::router())
        .with_state(state);

    match (args.cert, args.key) {
        (Some(cert), Some(key)) => {
            let config = RustlsConfig::from_pem_file(cert, key).await?;

            axum_server::bind_rustls(args.bind, config)
                .serve(app.into_make_service())
                .await?;
        }
        _ => {
            axum_server::bind(args.bind)
                .serve(app.into_make_service())
                .await?;
        }
    }

    Ok(())
}

#[derive(Default, Debug)]
pub struct AppState {
    pub data_file: PathBuf,
    pub tasks: Mutex<HashMap<Uuid, Task>>,
}

impl AppState {
    pub fn load(data_file: PathBuf) -> eyre::Result<Self> {
        let file = match fs::File::open(&data_file) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    data_file,
                    ..Self::default()
                });
            }
            Err(err) => eyre::bail!(err),
        };
        let data: DataOwned = ron::de::from_reader(file)?;

        match data {
            DataOwned::V1 { tasks } => Ok(Self {
                data_file,
                tasks: Mutex::new(tasks),
            }),
        }
    }

    pub async fn store(&self) -> eyre::Result<()> {
        let tasks = self.tasks.lock().await;
        let data = DataBorrowed::V1 { tasks: &tasks };

        let file = fs::File::create(&self.data_file)?;
        let mut ser = ron::Serializer::new(file, Some(Default::default()))?;
        data.serialize(&mut ser)?;

        Ok(())
    }
}

#[derive(Serialize)]
enum DataBorrowed<'a> {
    V1 { tasks: &'a HashMap<Uuid, Task> },
}

#[derive(Deserialize)]
enum DataOwned {
    V1 { tasks: HashMap<Uuid, Task> },
}
