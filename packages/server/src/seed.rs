use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder, SqliteQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{advertisement, operator, screen};
use crate::utils::hash;

/// Create the operator account if no account with this email exists.
///
/// An existing account keeps its password; changing the configured password
/// does not rotate it.
pub async fn ensure_operator(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        anyhow::bail!("operator email and password must not be empty");
    }

    let password_hash = hash::hash_password(password)
        .map_err(|e| anyhow::anyhow!("Password hash error: {e}"))?;

    let model = operator::ActiveModel {
        email: Set(email.to_string()),
        password: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = operator::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(operator::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => {}
        Ok(_) => info!(%email, "Seeded operator account"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Ensure the indexes behind the newest-first listings exist.
///
/// Schema sync only creates indexes declared on single columns, so these are
/// created by hand on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        (
            "idx_screen_created",
            Index::create()
                .if_not_exists()
                .name("idx_screen_created")
                .table(screen::Entity)
                .col(screen::Column::CreatedAt)
                .to_owned(),
        ),
        (
            "idx_advertisement_created",
            Index::create()
                .if_not_exists()
                .name("idx_advertisement_created")
                .table(advertisement::Entity)
                .col(advertisement::Column::CreatedAt)
                .to_owned(),
        ),
    ];

    for (name, stmt) in statements {
        let sql = index_sql(db.get_database_backend(), &stmt);
        match db.execute_unprepared(&sql).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}

fn index_sql(backend: DbBackend, stmt: &IndexCreateStatement) -> String {
    match backend {
        DbBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
        _ => stmt.to_string(PostgresQueryBuilder),
    }
}
