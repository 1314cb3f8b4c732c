//! Content tables backing the public page.
//!
//! `profile` is limited to one row by the `profile_singleton` index.
//! Every table carries a store-generated `id` and a `created_at` stamp.
//! `end_date` / `expiry_date` are nullable: NULL means "ongoing".
//! `technologies` is a JSONB array of strings.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .uuid()
        .not_null()
        .primary_key()
        .default(Expr::cust("gen_random_uuid()"))
        .to_owned()
}

fn created_at_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // profile (singleton)
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(id_col(Profile::Id))
                    .col(ColumnDef::new(Profile::Name).text().not_null())
                    .col(ColumnDef::new(Profile::Title).text().not_null())
                    .col(ColumnDef::new(Profile::Bio).text().not_null())
                    .col(ColumnDef::new(Profile::Location).text().null())
                    .col(ColumnDef::new(Profile::Email).text().null())
                    .col(ColumnDef::new(Profile::Phone).text().null())
                    .col(ColumnDef::new(Profile::GithubUrl).text().null())
                    .col(ColumnDef::new(Profile::LinkedinUrl).text().null())
                    .col(ColumnDef::new(Profile::WebsiteUrl).text().null())
                    .col(ColumnDef::new(Profile::AvatarUrl).text().null())
                    .col(ColumnDef::new(Profile::ResumeUrl).text().null())
                    .col(
                        ColumnDef::new(Profile::YearsOfExperience)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at_col(Profile::CreatedAt))
                    .col(created_at_col(Profile::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // A constant-expression unique index allows at most one row.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS profile_singleton ON profile ((true));",
            )
            .await?;

        // =====================================================
        // skills
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(id_col(Skills::Id))
                    .col(ColumnDef::new(Skills::Name).text().not_null())
                    .col(ColumnDef::new(Skills::Category).text().not_null())
                    .col(ColumnDef::new(Skills::IconUrl).text().null())
                    .col(created_at_col(Skills::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // education
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Education::Table)
                    .if_not_exists()
                    .col(id_col(Education::Id))
                    .col(ColumnDef::new(Education::Institution).text().not_null())
                    .col(ColumnDef::new(Education::Degree).text().not_null())
                    .col(ColumnDef::new(Education::FieldOfStudy).text().not_null())
                    .col(ColumnDef::new(Education::StartDate).date().not_null())
                    .col(ColumnDef::new(Education::EndDate).date().null())
                    .col(ColumnDef::new(Education::Gpa).double().null())
                    .col(
                        ColumnDef::new(Education::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(created_at_col(Education::CreatedAt))
                    .check(Expr::cust("gpa IS NULL OR (gpa >= 0 AND gpa <= 4)"))
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // experience
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Experience::Table)
                    .if_not_exists()
                    .col(id_col(Experience::Id))
                    .col(ColumnDef::new(Experience::Company).text().not_null())
                    .col(ColumnDef::new(Experience::Position).text().not_null())
                    .col(ColumnDef::new(Experience::StartDate).date().not_null())
                    .col(ColumnDef::new(Experience::EndDate).date().null())
                    .col(ColumnDef::new(Experience::Description).text().not_null())
                    .col(
                        ColumnDef::new(Experience::Technologies)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(created_at_col(Experience::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // projects
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(id_col(Projects::Id))
                    .col(ColumnDef::new(Projects::Title).text().not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null())
                    .col(
                        ColumnDef::new(Projects::Technologies)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Projects::GithubUrl).text().null())
                    .col(ColumnDef::new(Projects::LiveUrl).text().null())
                    .col(ColumnDef::new(Projects::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(Projects::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at_col(Projects::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // certificates
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(id_col(Certificates::Id))
                    .col(ColumnDef::new(Certificates::Title).text().not_null())
                    .col(ColumnDef::new(Certificates::Issuer).text().not_null())
                    .col(ColumnDef::new(Certificates::IssueDate).date().not_null())
                    .col(ColumnDef::new(Certificates::ExpiryDate).date().null())
                    .col(ColumnDef::new(Certificates::CredentialId).text().null())
                    .col(ColumnDef::new(Certificates::CredentialUrl).text().null())
                    .col(ColumnDef::new(Certificates::ImageUrl).text().null())
                    .col(created_at_col(Certificates::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Ordering indexes (match the list order of each collection)
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_skills_name ON skills (name);
                CREATE INDEX IF NOT EXISTS idx_education_start_date ON education (start_date DESC);
                CREATE INDEX IF NOT EXISTS idx_experience_start_date ON experience (start_date DESC);
                CREATE INDEX IF NOT EXISTS idx_projects_created_at ON projects (created_at DESC);
                CREATE INDEX IF NOT EXISTS idx_certificates_issue_date ON certificates (issue_date DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certificates::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Experience::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Education::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profile::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Profile {
    Table,
    Id,
    Name,
    Title,
    Bio,
    Location,
    Email,
    Phone,
    GithubUrl,
    LinkedinUrl,
    WebsiteUrl,
    AvatarUrl,
    ResumeUrl,
    YearsOfExperience,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
    Name,
    Category,
    IconUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Education {
    Table,
    Id,
    Institution,
    Degree,
    FieldOfStudy,
    StartDate,
    EndDate,
    Gpa,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Experience {
    Table,
    Id,
    Company,
    Position,
    StartDate,
    EndDate,
    Description,
    Technologies,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    Technologies,
    GithubUrl,
    LiveUrl,
    ImageUrl,
    Featured,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Certificates {
    Table,
    Id,
    Title,
    Issuer,
    IssueDate,
    ExpiryDate,
    CredentialId,
    CredentialUrl,
    ImageUrl,
    CreatedAt,
}
