//! Readings report planning — filter vocabulary and paginated,
//! tenant-isolated page queries.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};
use vigil_core::error::{FieldViolation, VigilError, VigilResult};
use vigil_core::repository::{DirectoryStore, ReadingsQuery, ReadingsStore};

use crate::browser::{
    FilterVocabulary, ReadingsBrowserFilter, ReadingsBrowserPage, ReadingsBrowserParameters,
};
use crate::config::PlannerConfig;
use crate::token::{self, ContinuationToken};

/// Builds the queryable filter vocabulary from inventory metadata and
/// executes tenant-scoped, filtered, paginated queries against the
/// time-series collaborator.
///
/// Tenant isolation is enforced here: requested filter ids are scoped
/// to the tenant's own inventory before the query, and returned rows
/// are checked again afterwards — the collaborator is not trusted.
pub struct ReadingsReportPlanner<D, R> {
    directory: D,
    readings: R,
    config: PlannerConfig,
}

/// Caller parameters after validation: sets deduplicated and
/// canonically ordered, the continuation token decoded.
struct NormalizedRequest {
    asset_ids: Option<BTreeSet<String>>,
    sensor_ids: Option<BTreeSet<String>>,
    metric_types: Option<BTreeSet<String>>,
    token: Option<ContinuationToken>,
}

impl NormalizedRequest {
    /// Validate and normalize. Violations are collected across every
    /// field and reported in one aggregated error.
    fn from_params(params: &ReadingsBrowserParameters) -> VigilResult<Self> {
        let mut violations = Vec::new();

        let asset_ids = normalize_set("asset_ids", params.asset_ids.as_deref(), &mut violations);
        let sensor_ids = normalize_set("sensor_ids", params.sensor_ids.as_deref(), &mut violations);
        let metric_types =
            normalize_set("metric_types", params.metric_types.as_deref(), &mut violations);

        // An empty token string means "no token", same as an absent
        // next_token on the way out.
        let token = match params.continuation_token.as_deref() {
            None | Some("") => None,
            Some(raw) => match token::decode(raw) {
                Some(token) => Some(token),
                None => {
                    violations.push(FieldViolation::new(
                        "continuation_token",
                        "not a valid continuation token",
                    ));
                    None
                }
            },
        };

        if !violations.is_empty() {
            return Err(VigilError::Validation { violations });
        }

        Ok(Self {
            asset_ids,
            sensor_ids,
            metric_types,
            token,
        })
    }

    fn fingerprint(&self, tenant_id: &str) -> String {
        token::fingerprint(
            tenant_id,
            self.asset_ids.as_ref(),
            self.sensor_ids.as_ref(),
            self.metric_types.as_ref(),
        )
    }
}

fn normalize_set(
    field: &str,
    entries: Option<&[String]>,
    violations: &mut Vec<FieldViolation>,
) -> Option<BTreeSet<String>> {
    let entries = entries?;
    let mut set = BTreeSet::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.trim().is_empty() {
            violations.push(FieldViolation::new(
                format!("{field}[{index}]"),
                "must not be blank",
            ));
        } else {
            set.insert(entry.clone());
        }
    }
    Some(set)
}

fn collaborator_failure(source: &str, err: VigilError) -> VigilError {
    warn!(%err, source, "collaborator call failed");
    VigilError::Unhandled(format!("{source} unavailable"))
}

fn require_tenant(tenant_id: &str) -> VigilResult<()> {
    if tenant_id.trim().is_empty() {
        return Err(VigilError::IncompleteData {
            message: "tenant id is required".into(),
        });
    }
    Ok(())
}

impl<D, R> ReadingsReportPlanner<D, R>
where
    D: DirectoryStore,
    R: ReadingsStore,
{
    pub fn new(directory: D, readings: R, config: PlannerConfig) -> Self {
        Self {
            directory,
            readings,
            config,
        }
    }

    /// List one filter row per sensor across the tenant's assets, plus
    /// the distinct metric names recorded for the tenant. Recomputed on
    /// every call.
    pub async fn filter_vocabulary(&self, tenant_id: &str) -> VigilResult<FilterVocabulary> {
        require_tenant(tenant_id)?;

        let assets = self
            .directory
            .list_assets(tenant_id)
            .await
            .map_err(|e| collaborator_failure("configuration store", e))?;
        let sensors = self
            .directory
            .list_sensors(tenant_id)
            .await
            .map_err(|e| collaborator_failure("configuration store", e))?;

        let assets_by_id: HashMap<&str, _> =
            assets.iter().map(|a| (a.id.as_str(), a)).collect();

        let mut filters: Vec<ReadingsBrowserFilter> = sensors
            .iter()
            .filter_map(|sensor| {
                let asset = assets_by_id.get(sensor.asset_id.as_str())?;
                Some(ReadingsBrowserFilter {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    asset_description: asset.description.clone(),
                    sensor_id: sensor.id.clone(),
                    sensor_type: sensor.sensor_type.clone(),
                    sensor_description: sensor.description.clone(),
                })
            })
            .collect();
        filters.sort_by(|a, b| {
            a.asset_id
                .cmp(&b.asset_id)
                .then_with(|| a.sensor_id.cmp(&b.sensor_id))
        });

        let metric_types = self
            .readings
            .metric_names(tenant_id)
            .await
            .map_err(|e| collaborator_failure("time-series store", e))?;

        Ok(FilterVocabulary {
            filters,
            metric_types,
        })
    }

    /// Fetch one page of readings for the tenant, resuming from the
    /// continuation token when present.
    pub async fn page(
        &self,
        tenant_id: &str,
        params: &ReadingsBrowserParameters,
    ) -> VigilResult<ReadingsBrowserPage> {
        require_tenant(tenant_id)?;
        let request = NormalizedRequest::from_params(params)?;

        let fingerprint = request.fingerprint(tenant_id);
        if let Some(token) = &request.token
            && token.fingerprint != fingerprint
        {
            return Err(VigilError::Validation {
                violations: vec![FieldViolation::new(
                    "continuation_token",
                    "token was produced by a different query; restart from the first page",
                )],
            });
        }

        let Some(query) = self.scope_to_tenant(tenant_id, &request).await? else {
            // Every requested id was foreign to this tenant; scoped out
            // rather than rejected.
            return Ok(ReadingsBrowserPage::empty());
        };

        let cursor = request.token.as_ref().map(|t| t.cursor.as_str());
        let batch = self
            .readings
            .query(tenant_id, &query, cursor, self.config.page_size)
            .await
            .map_err(|e| collaborator_failure("time-series store", e))?;

        let mut rows = batch.rows;
        let fetched = rows.len();
        rows.retain(|row| row.tenant_id == tenant_id);
        if rows.len() != fetched {
            warn!(
                tenant_id,
                dropped = fetched - rows.len(),
                "time-series store returned rows outside the tenant scope"
            );
        }

        let next_token = batch.next_cursor.map(|cursor| {
            token::encode(&ContinuationToken {
                fingerprint: fingerprint.clone(),
                cursor,
            })
        });

        Ok(ReadingsBrowserPage { rows, next_token })
    }

    /// Restrict requested asset/sensor ids to the tenant's inventory.
    ///
    /// Ids belonging to other tenants are dropped silently. `None`
    /// means a requested set lost every entry — the caller must produce
    /// an empty page, never an unfiltered query.
    async fn scope_to_tenant(
        &self,
        tenant_id: &str,
        request: &NormalizedRequest,
    ) -> VigilResult<Option<ReadingsQuery>> {
        let mut query = ReadingsQuery {
            metric_names: request.metric_types.clone(),
            ..ReadingsQuery::default()
        };

        if let Some(requested) = &request.asset_ids {
            let owned: BTreeSet<String> = self
                .directory
                .list_assets(tenant_id)
                .await
                .map_err(|e| collaborator_failure("configuration store", e))?
                .into_iter()
                .map(|a| a.id)
                .collect();
            let Some(kept) = retain_owned(tenant_id, "asset", requested, &owned) else {
                return Ok(None);
            };
            query.asset_ids = Some(kept);
        }

        if let Some(requested) = &request.sensor_ids {
            let owned: BTreeSet<String> = self
                .directory
                .list_sensors(tenant_id)
                .await
                .map_err(|e| collaborator_failure("configuration store", e))?
                .into_iter()
                .map(|s| s.id)
                .collect();
            let Some(kept) = retain_owned(tenant_id, "sensor", requested, &owned) else {
                return Ok(None);
            };
            query.sensor_ids = Some(kept);
        }

        Ok(Some(query))
    }
}

fn retain_owned(
    tenant_id: &str,
    dimension: &str,
    requested: &BTreeSet<String>,
    owned: &BTreeSet<String>,
) -> Option<BTreeSet<String>> {
    let kept: BTreeSet<String> = requested.intersection(owned).cloned().collect();
    let dropped = requested.len() - kept.len();
    if dropped > 0 {
        debug!(
            tenant_id,
            dimension, dropped, "scoped out filter ids not owned by the tenant"
        );
    }
    if kept.is_empty() { None } else { Some(kept) }
}
