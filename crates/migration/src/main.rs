use sea_orm::Database;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cmd = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());

    // The app migrates its own database on startup; this binary exists for
    // operating on a database out of band, so the target must be explicit.
    let Ok(db_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL must be set, e.g. sqlite:./shop.db?mode=rwc");
        std::process::exit(2);
    };

    let db = Database::connect(&db_url).await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, None).await?,
        "down" => migration::Migrator::down(&db, None).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => {
            migration::Migrator::status(&db).await?;
        }
        other => {
            eprintln!("unknown command \"{other}\": expected up, down, fresh or status");
            std::process::exit(2);
        }
    }

    Ok(())
}
