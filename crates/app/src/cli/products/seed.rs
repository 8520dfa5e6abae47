use clap::Args;
use merx_app::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService},
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let products = PgProductsService::new(Db::new(pool));

    let inserted = products
        .seed_initial_products()
        .await
        .map_err(|error| format!("failed to seed products: {error}"))?;

    if inserted == 0 {
        println!("products already present; nothing to seed");
    } else {
        println!("seeded {inserted} products");
    }

    Ok(())
}
