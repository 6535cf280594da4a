#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use pdti_stats_api::app::{app, AppState};
use pdti_stats_api::auth::{generate_jwt, Claims, Scope};
use pdti_stats_api::config::{AppConfig, Environment};
use pdti_stats_api::database::models::{InstructionStats, ProjectSummary};
use pdti_stats_api::database::{DatabaseError, StatsRepository};
use pdti_stats_api::stats::StatRow;

pub const SECRET: &str = "integration-test-secret";

pub const ADMIN: i32 = 1;
pub const GOVERNOR: i32 = 2;
pub const COORDINATOR: i32 = 4;
pub const POLE_HEAD: i32 = 5;
pub const PACHA: i32 = 7;

/// In-memory stand-in for the PostgreSQL statistics queries.
#[derive(Default)]
pub struct MemoryRepository {
    pub rows: Vec<StatRow>,
    pub circle_rows: HashMap<String, Vec<StatRow>>,
    pub projects: Vec<ProjectSummary>,
    /// Counters per issuer; `None` is the whole register.
    pub instructions: HashMap<Option<i64>, InstructionStats>,
    pub failing: bool,
    pub seen_scopes: Mutex<Vec<Scope>>,
}

impl MemoryRepository {
    pub fn with_rows(rows: Vec<StatRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn scopes(&self) -> Vec<Scope> {
        self.seen_scopes.lock().unwrap().clone()
    }

    fn projects_in(&self, scope: &Scope) -> Vec<ProjectSummary> {
        let mut projects: Vec<ProjectSummary> = self
            .projects
            .iter()
            .filter(|project| match scope {
                Scope::Pole { pole_id } => project.pole_id == Some(*pole_id),
                _ => true,
            })
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.project_number.cmp(&b.project_number));
        projects
    }

    fn fail_if_needed(&self) -> Result<(), DatabaseError> {
        if self.failing {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StatsRepository for MemoryRepository {
    async fn hierarchy_rows(&self, scope: &Scope) -> Result<Vec<StatRow>, DatabaseError> {
        self.seen_scopes.lock().unwrap().push(scope.clone());
        self.fail_if_needed()?;

        Ok(match scope {
            Scope::Global => self.rows.clone(),
            Scope::Pole { pole_id } => self
                .rows
                .iter()
                .filter(|row| row.pole_id == Some(*pole_id))
                .cloned()
                .collect(),
            Scope::Circle { code_cercle } => self.circle_rows.get(code_cercle).cloned().unwrap_or_default(),
        })
    }

    async fn projects_by_axis(&self, axis_id: i64, scope: &Scope) -> Result<Vec<ProjectSummary>, DatabaseError> {
        self.seen_scopes.lock().unwrap().push(scope.clone());
        self.fail_if_needed()?;

        Ok(self
            .projects_in(scope)
            .into_iter()
            .filter(|project| project.axis_id == axis_id)
            .collect())
    }

    async fn projects_page(&self, scope: &Scope, limit: u32, offset: u64) -> Result<Vec<ProjectSummary>, DatabaseError> {
        self.seen_scopes.lock().unwrap().push(scope.clone());
        self.fail_if_needed()?;

        Ok(self
            .projects_in(scope)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_projects(&self, scope: &Scope) -> Result<u64, DatabaseError> {
        self.fail_if_needed()?;
        Ok(self.projects_in(scope).len() as u64)
    }

    async fn instruction_stats(&self, issuer_id: Option<i64>) -> Result<InstructionStats, DatabaseError> {
        self.fail_if_needed()?;
        Ok(self.instructions.get(&issuer_id).copied().unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.fail_if_needed()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_environment(Environment::Development);
    config.security.jwt_secret = SECRET.to_string();
    config.api.enable_request_logging = false;
    config
}

pub fn test_app(repository: Arc<MemoryRepository>) -> Router {
    app(AppState::new(test_config(), repository))
}

pub fn token(profile_id: i32, pole_id: Option<i64>, code_cercle: Option<&str>) -> String {
    let claims = Claims::new(
        42,
        format!("user{}@pdti.ma", profile_id),
        profile_id,
        pole_id,
        code_cercle.map(str::to_string),
        1,
    )
    .expect("test claims");
    generate_jwt(&claims, SECRET).expect("test token")
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    send(app, request.body(Body::empty())?).await
}

pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub fn money(units: i64, scale: u32) -> Decimal {
    Decimal::new(units, scale)
}

/// Two poles, three axes, one unsectored project group.
pub fn sample_rows() -> Vec<StatRow> {
    vec![
        StatRow::new(1, "Développement économique")
            .with_pole(1, "Pôle Économique")
            .with_sector(Some(10), Some("Agriculture"))
            .with_objective(Some(100), Some("Irrigation"))
            .with_measures(2, money(50, 1), 3, 40),
        StatRow::new(1, "Développement économique")
            .with_pole(1, "Pôle Économique")
            .with_sector(Some(10), Some("Agriculture"))
            .with_objective(Some(101), Some("Élevage"))
            .with_measures(1, money(20, 1), 1, 10),
        StatRow::new(2, "Infrastructures")
            .with_pole(2, "Pôle Infrastructures")
            .with_sector(Some(20), Some("Routes"))
            .with_objective(Some(200), Some("Désenclavement"))
            .with_measures(4, money(300, 1), 12, 500),
        StatRow::new(2, "Infrastructures")
            .with_pole(2, "Pôle Infrastructures")
            .with_sector(None, None)
            .with_objective(None, None)
            .with_measures(1, money(10, 1), 0, 0),
        StatRow::new(3, "Social")
            .with_pole(2, "Pôle Infrastructures")
            .with_sector(Some(30), Some("Santé"))
            .with_objective(Some(300), Some("Dispensaires"))
            .with_measures(2, money(0, 0), 4, 1200),
    ]
}

pub fn project(id: i64, axis_id: i64, pole_id: i64) -> ProjectSummary {
    ProjectSummary {
        id,
        project_number: Some(format!("P-{:03}", id)),
        title: Some(format!("Projet {}", id)),
        total_cost: Some(money(15, 1)),
        direct_jobs: Some(2),
        beneficiaries: Some(30),
        start_year: Some(2024),
        end_year: Some(2026),
        axis_id,
        axis_label: Some(format!("Axe {}", axis_id)),
        sector_id: None,
        sector_label: None,
        pole_id: Some(pole_id),
        pole_label: None,
    }
}
