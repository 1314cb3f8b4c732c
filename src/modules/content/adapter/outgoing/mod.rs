mod mapping;
pub mod sea_orm_entity;

pub mod certificate_repository_postgres;
pub mod education_repository_postgres;
pub mod experience_repository_postgres;
pub mod profile_repository_postgres;
pub mod project_repository_postgres;
pub mod skill_repository_postgres;
pub mod stats_query_postgres;

pub use certificate_repository_postgres::CertificateRepositoryPostgres;
pub use education_repository_postgres::EducationRepositoryPostgres;
pub use experience_repository_postgres::ExperienceRepositoryPostgres;
pub use profile_repository_postgres::ProfileRepositoryPostgres;
pub use project_repository_postgres::ProjectRepositoryPostgres;
pub use skill_repository_postgres::SkillRepositoryPostgres;
pub use stats_query_postgres::StatsQueryPostgres;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::modules::content::application::ports::outgoing::ContentStore;

/// Wires every collection to its Postgres repository over one pool.
pub fn postgres_content_store(db: Arc<DatabaseConnection>) -> ContentStore {
    ContentStore {
        profile: Arc::new(ProfileRepositoryPostgres::new(Arc::clone(&db))),
        skills: Arc::new(SkillRepositoryPostgres::new(Arc::clone(&db))),
        education: Arc::new(EducationRepositoryPostgres::new(Arc::clone(&db))),
        experience: Arc::new(ExperienceRepositoryPostgres::new(Arc::clone(&db))),
        projects: Arc::new(ProjectRepositoryPostgres::new(Arc::clone(&db))),
        certificates: Arc::new(CertificateRepositoryPostgres::new(Arc::clone(&db))),
        stats: Arc::new(StatsQueryPostgres::new(db)),
    }
}
