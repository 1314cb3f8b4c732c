//! `get_portfolio_stats()` returns the single row shown in the "about" block:
//! project count, skill count and the profile's years of experience.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION get_portfolio_stats()
                RETURNS TABLE (
                    total_projects BIGINT,
                    total_skills BIGINT,
                    years_experience INTEGER
                )
                LANGUAGE sql STABLE AS $$
                    SELECT
                        (SELECT COUNT(*) FROM projects),
                        (SELECT COUNT(*) FROM skills),
                        COALESCE(
                            (SELECT years_of_experience FROM profile ORDER BY created_at LIMIT 1),
                            0
                        );
                $$;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS get_portfolio_stats();")
            .await?;

        Ok(())
    }
}
