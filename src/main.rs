use std::sync::Arc;

use clinic_api::config::ApiConfig;
use clinic_db::{create_pool, schema::initialize_database, store::PgClinicStore};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;
    initialize_database(&db_pool).await?;

    let store = Arc::new(PgClinicStore::new(db_pool));
    clinic_api::start_server(config, store).await?;

    Ok(())
}
