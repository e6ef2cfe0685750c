use color_eyre::eyre::Result;
use dotenv::dotenv;
use portal_api::config::ApiConfig;
use portal_db::{create_pool, schema::initialize_database, store::Repositories};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    portal_api::start_server(config, Repositories::postgres(db_pool)).await?;

    Ok(())
}
