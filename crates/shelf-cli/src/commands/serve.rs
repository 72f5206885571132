use std::sync::Arc;

use clap::Args;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use shelf_files::handlers::{configure_routes, FilesApiDoc, FilesAppState};
use shelf_files::{FileService, S3ObjectStore, StoreConfig};

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:3000", env = "SHELF_ADDRESS")]
    pub address: String,

    /// Endpoint URL of the S3-compatible store
    #[arg(long, env = "SHELF_S3_ENDPOINT")]
    pub s3_endpoint: String,

    /// Region name (MinIO/RustFS accept any value)
    #[arg(long, default_value = "us-east-1", env = "SHELF_S3_REGION")]
    pub s3_region: String,

    /// Access key id for the store
    #[arg(long, env = "SHELF_S3_ACCESS_KEY")]
    pub s3_access_key: String,

    /// Secret access key for the store
    #[arg(long, env = "SHELF_S3_SECRET_KEY")]
    pub s3_secret_key: String,

    /// Bucket holding the files served by this instance
    #[arg(long, env = "SHELF_S3_BUCKET")]
    pub s3_bucket: String,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let config = StoreConfig::new(
            self.s3_endpoint.clone(),
            self.s3_access_key.clone(),
            self.s3_secret_key.clone(),
            self.s3_bucket.clone(),
        )
        .with_region(self.s3_region.clone());

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let store = Arc::new(S3ObjectStore::connect(&config).await);
            let file_service = Arc::new(FileService::new(store));
            let state = Arc::new(FilesAppState { file_service });

            let app = configure_routes().with_state(state).merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", FilesApiDoc::openapi()),
            );

            info!(
                "Starting Shelf server on {} (bucket: {})",
                self.address, self.s3_bucket
            );

            let listener = tokio::net::TcpListener::bind(&self.address).await?;
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            Ok(())
        })
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl-c signal");
    info!("Received Ctrl+C, shutting down...");
}
