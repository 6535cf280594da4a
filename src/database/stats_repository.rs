use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::Scope;
use crate::config::DatabaseConfig;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{InstructionStats, ProjectSummary, RawInstructionStats};
use crate::stats::{RawStatRow, StatRow};

/// Source of the rows the dashboards are built from.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Statistic rows grouped by (axis, sector, objective) within `scope`.
    async fn hierarchy_rows(&self, scope: &Scope) -> Result<Vec<StatRow>, DatabaseError>;

    async fn projects_by_axis(&self, axis_id: i64, scope: &Scope) -> Result<Vec<ProjectSummary>, DatabaseError>;

    /// Projects in `scope` ordered by project number, one page at a time.
    async fn projects_page(&self, scope: &Scope, limit: u32, offset: u64) -> Result<Vec<ProjectSummary>, DatabaseError>;

    async fn count_projects(&self, scope: &Scope) -> Result<u64, DatabaseError>;

    /// Instruction counters, restricted to one issuer when `issuer_id` is set.
    async fn instruction_stats(&self, issuer_id: Option<i64>) -> Result<InstructionStats, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

// Projects restricted to a pachalik are those linked to at least one commune
// of the circle.
const HIERARCHY_ROWS_SQL: &str = r#"
    SELECT
        a.id::BIGINT AS axis_id,
        a.lib_axe AS axis_label,
        a.pole_id::BIGINT AS pole_id,
        po.lib_pole AS pole_label,
        s.id::BIGINT AS sector_id,
        s.lib_secteur AS sector_label,
        o.id::BIGINT AS objective_id,
        o.nom_objectif AS objective_label,
        COUNT(p.id)::BIGINT AS project_count,
        COALESCE(SUM(p.cout_total_mdh), 0)::NUMERIC AS total_cost,
        COALESCE(SUM(p.nbr_emplois_directs), 0)::BIGINT AS total_direct_jobs,
        COALESCE(SUM(p.nbr_beneficiaires), 0)::BIGINT AS total_beneficiaries
    FROM projets p
    JOIN axes a ON p.axe_id = a.id
    LEFT JOIN poles po ON a.pole_id = po.id
    LEFT JOIN secteurs s ON p.secteur_id = s.id
    LEFT JOIN objectifs o ON p.objectif_id = o.id
    WHERE ($1::BIGINT IS NULL OR a.pole_id = $1)
      AND ($2::TEXT IS NULL OR p.id IN (
            SELECT pc.projet_id
            FROM projets_communes pc
            JOIN communes c ON pc.commune_id = c.id
            WHERE c.code_cercle = $2))
    GROUP BY a.id, a.lib_axe, a.pole_id, po.lib_pole, s.id, s.lib_secteur, o.id, o.nom_objectif
    ORDER BY a.id, s.id, o.id
"#;

const PROJECTS_BY_AXIS_SQL: &str = r#"
    SELECT
        p.id::BIGINT AS id,
        p.num_projet::TEXT AS project_number,
        p.intitule AS title,
        p.cout_total_mdh::NUMERIC AS total_cost,
        p.nbr_emplois_directs::BIGINT AS direct_jobs,
        p.nbr_beneficiaires::BIGINT AS beneficiaries,
        p.annee_debut::INT AS start_year,
        p.annee_fin::INT AS end_year,
        a.id::BIGINT AS axis_id,
        a.lib_axe AS axis_label,
        s.id::BIGINT AS sector_id,
        s.lib_secteur AS sector_label,
        po.id::BIGINT AS pole_id,
        po.lib_pole AS pole_label
    FROM projets p
    JOIN axes a ON p.axe_id = a.id
    LEFT JOIN secteurs s ON p.secteur_id = s.id
    LEFT JOIN poles po ON a.pole_id = po.id
    WHERE p.axe_id = $1
      AND ($2::BIGINT IS NULL OR a.pole_id = $2)
      AND ($3::TEXT IS NULL OR p.id IN (
            SELECT pc.projet_id
            FROM projets_communes pc
            JOIN communes c ON pc.commune_id = c.id
            WHERE c.code_cercle = $3))
    ORDER BY p.num_projet ASC
"#;

const PROJECTS_PAGE_SQL: &str = r#"
    SELECT
        p.id::BIGINT AS id,
        p.num_projet::TEXT AS project_number,
        p.intitule AS title,
        p.cout_total_mdh::NUMERIC AS total_cost,
        p.nbr_emplois_directs::BIGINT AS direct_jobs,
        p.nbr_beneficiaires::BIGINT AS beneficiaries,
        p.annee_debut::INT AS start_year,
        p.annee_fin::INT AS end_year,
        a.id::BIGINT AS axis_id,
        a.lib_axe AS axis_label,
        s.id::BIGINT AS sector_id,
        s.lib_secteur AS sector_label,
        po.id::BIGINT AS pole_id,
        po.lib_pole AS pole_label
    FROM projets p
    JOIN axes a ON p.axe_id = a.id
    LEFT JOIN secteurs s ON p.secteur_id = s.id
    LEFT JOIN poles po ON a.pole_id = po.id
    WHERE ($1::BIGINT IS NULL OR a.pole_id = $1)
      AND ($2::TEXT IS NULL OR p.id IN (
            SELECT pc.projet_id
            FROM projets_communes pc
            JOIN communes c ON pc.commune_id = c.id
            WHERE c.code_cercle = $2))
    ORDER BY p.num_projet ASC, p.id ASC
    LIMIT $3 OFFSET $4
"#;

const COUNT_PROJECTS_SQL: &str = r#"
    SELECT COUNT(*)::BIGINT
    FROM projets p
    JOIN axes a ON p.axe_id = a.id
    WHERE ($1::BIGINT IS NULL OR a.pole_id = $1)
      AND ($2::TEXT IS NULL OR p.id IN (
            SELECT pc.projet_id
            FROM projets_communes pc
            JOIN communes c ON pc.commune_id = c.id
            WHERE c.code_cercle = $2))
"#;

// "Urgent" is derived from the deadline, independently of the status label.
const INSTRUCTION_STATS_SQL: &str = r#"
    SELECT
        COUNT(*)::BIGINT AS total,
        COUNT(*) FILTER (WHERE si.lib_statut = 'Exécuté')::BIGINT AS executed,
        COUNT(*) FILTER (WHERE si.lib_statut = 'En Cours')::BIGINT AS in_progress,
        COUNT(*) FILTER (WHERE si.lib_statut = 'En Retard')::BIGINT AS overdue,
        COUNT(*) FILTER (WHERE i.date_limite < CURRENT_DATE AND si.lib_statut <> 'Exécuté')::BIGINT AS urgent
    FROM instructions i
    JOIN statuts_instructions si ON i.statut_id = si.id
    WHERE ($1::BIGINT IS NULL OR i.emetteur_id = $1)
"#;

/// `StatsRepository` over the program's PostgreSQL schema.
pub struct PgStatsRepository {
    pool: PgPool,
    query_logging: bool,
    slow_query_threshold_ms: u64,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            query_logging: config.enable_query_logging,
            slow_query_threshold_ms: config.slow_query_threshold_ms,
        }
    }

    fn record_timing(&self, query: &'static str, started: Instant, rows: usize) {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if elapsed_ms >= self.slow_query_threshold_ms {
            tracing::warn!(query, elapsed_ms, rows, "Slow statistics query");
        } else if self.query_logging {
            tracing::debug!(query, elapsed_ms, rows, "Statistics query");
        }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn hierarchy_rows(&self, scope: &Scope) -> Result<Vec<StatRow>, DatabaseError> {
        let started = Instant::now();
        let raw: Vec<RawStatRow> = sqlx::query_as(HIERARCHY_ROWS_SQL)
            .bind(scope.pole_id())
            .bind(scope.code_cercle())
            .fetch_all(&self.pool)
            .await?;
        self.record_timing("hierarchy_rows", started, raw.len());

        Ok(raw.into_iter().map(StatRow::from).collect())
    }

    async fn projects_by_axis(&self, axis_id: i64, scope: &Scope) -> Result<Vec<ProjectSummary>, DatabaseError> {
        let started = Instant::now();
        let projects: Vec<ProjectSummary> = sqlx::query_as(PROJECTS_BY_AXIS_SQL)
            .bind(axis_id)
            .bind(scope.pole_id())
            .bind(scope.code_cercle())
            .fetch_all(&self.pool)
            .await?;
        self.record_timing("projects_by_axis", started, projects.len());

        Ok(projects)
    }

    async fn projects_page(&self, scope: &Scope, limit: u32, offset: u64) -> Result<Vec<ProjectSummary>, DatabaseError> {
        let started = Instant::now();
        let projects: Vec<ProjectSummary> = sqlx::query_as(PROJECTS_PAGE_SQL)
            .bind(scope.pole_id())
            .bind(scope.code_cercle())
            .bind(i64::from(limit))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        self.record_timing("projects_page", started, projects.len());

        Ok(projects)
    }

    async fn count_projects(&self, scope: &Scope) -> Result<u64, DatabaseError> {
        let started = Instant::now();
        let total: i64 = sqlx::query_scalar(COUNT_PROJECTS_SQL)
            .bind(scope.pole_id())
            .bind(scope.code_cercle())
            .fetch_one(&self.pool)
            .await?;
        self.record_timing("count_projects", started, 1);

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn instruction_stats(&self, issuer_id: Option<i64>) -> Result<InstructionStats, DatabaseError> {
        let started = Instant::now();
        let raw: RawInstructionStats = sqlx::query_as(INSTRUCTION_STATS_SQL)
            .bind(issuer_id)
            .fetch_one(&self.pool)
            .await?;
        self.record_timing("instruction_stats", started, 1);

        Ok(raw.into())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
