//! Inventory service contract and in-memory catalog.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::PartId;
use domain::{
    Category, Dimensions, Manufacturer, MetadataValue, Money, Part, PartSnapshot, PartsFilter,
};
use uuid::Uuid;

use crate::error::GatewayError;

/// Identifier of the seeded "Hyperdrive Engine" part.
pub const HYPERDRIVE_ENGINE_ID: PartId =
    PartId::from_uuid(Uuid::from_u128(0x111e4567_e89b_12d3_a456_426614174001));

/// Identifier of the seeded "Quantum Shield Generator" part.
pub const QUANTUM_SHIELD_ID: PartId =
    PartId::from_uuid(Uuid::from_u128(0x222e4567_e89b_12d3_a456_426614174002));

/// Trait for resolving part identifiers against the catalog.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Returns price snapshots for exactly those `ids` that exist in the
    /// catalog. Unknown ids are left out, not padded.
    async fn list_parts(&self, ids: &[PartId]) -> Result<Vec<PartSnapshot>, GatewayError>;
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    parts: HashMap<PartId, Part>,
    fail_on_list: bool,
    latency: Option<Duration>,
    calls: usize,
}

/// In-memory inventory service backed by a catalog map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryService {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryService {
    /// Creates an inventory service with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory service seeded with the default catalog.
    pub fn with_default_catalog() -> Self {
        let service = Self::new();
        for part in default_catalog() {
            service.add_part(part);
        }
        service
    }

    /// Adds or replaces a catalog part.
    pub fn add_part(&self, part: Part) {
        self.state_mut().parts.insert(part.id, part);
    }

    /// Returns the part with the given identifier.
    pub fn get_part(&self, id: PartId) -> Option<Part> {
        self.state().parts.get(&id).cloned()
    }

    /// Returns every catalog part matching the filter, ordered by name.
    pub fn find_parts(&self, filter: &PartsFilter) -> Vec<Part> {
        let mut parts: Vec<Part> = self
            .state()
            .parts
            .values()
            .filter(|part| filter.matches(part))
            .cloned()
            .collect();
        parts.sort_by(|a, b| a.name.cmp(&b.name));
        parts
    }

    /// Configures the service to fail subsequent `list_parts` calls.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.state_mut().fail_on_list = fail;
    }

    /// Delays every `list_parts` call, simulating a slow remote.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.state_mut().latency = latency;
    }

    /// Returns how many `list_parts` calls reached the service.
    pub fn call_count(&self) -> usize {
        self.state().calls
    }

    fn state(&self) -> RwLockReadGuard<'_, InMemoryInventoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, InMemoryInventoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl InventoryGateway for InMemoryInventoryService {
    async fn list_parts(&self, ids: &[PartId]) -> Result<Vec<PartSnapshot>, GatewayError> {
        let (fail, latency) = {
            let mut state = self.state_mut();
            state.calls += 1;
            (state.fail_on_list, state.latency)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if fail {
            return Err(GatewayError::Unavailable(
                "inventory service unreachable".to_string(),
            ));
        }
        // An empty id filter would match the whole catalog.
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let filter = PartsFilter::by_ids(ids.iter().copied());
        Ok(self
            .find_parts(&filter)
            .iter()
            .map(Part::snapshot)
            .collect())
    }
}

/// The two parts every fresh inventory service starts with.
pub fn default_catalog() -> Vec<Part> {
    let now = Utc::now();

    vec![
        Part {
            id: HYPERDRIVE_ENGINE_ID,
            name: "Hyperdrive Engine".to_string(),
            description: "A class-9 hyperdrive engine capable of faster-than-light travel."
                .to_string(),
            price: Money::from_units(450_000),
            stock_quantity: 3,
            category: Category::Engine,
            dimensions: Some(Dimensions {
                length: 120.0,
                width: 80.0,
                height: 100.0,
                weight: 500.0,
            }),
            manufacturer: Some(Manufacturer {
                name: "Hyperdrive Corp".to_string(),
                country: "USA".to_string(),
                website: "https://hyperdrive.example.com".to_string(),
            }),
            tags: vec![
                "engine".to_string(),
                "hyperdrive".to_string(),
                "space".to_string(),
            ],
            metadata: HashMap::from([
                ("power_output".to_string(), MetadataValue::Double(9.5)),
                ("is_experimental".to_string(), MetadataValue::Bool(true)),
            ]),
            created_at: now,
            updated_at: now,
        },
        Part {
            id: QUANTUM_SHIELD_ID,
            name: "Quantum Shield Generator".to_string(),
            description:
                "Advanced shield generator providing protection against cosmic radiation."
                    .to_string(),
            price: Money::from_units(175_000),
            stock_quantity: 5,
            category: Category::Shield,
            dimensions: Some(Dimensions {
                length: 60.0,
                width: 40.0,
                height: 50.0,
                weight: 150.0,
            }),
            manufacturer: Some(Manufacturer {
                name: "Quantum Tech".to_string(),
                country: "Germany".to_string(),
                website: "https://quantumtech.example.com".to_string(),
            }),
            tags: vec![
                "shield".to_string(),
                "quantum".to_string(),
                "defense".to_string(),
            ],
            metadata: HashMap::from([
                ("energy_consumption".to_string(), MetadataValue::Double(3.2)),
                ("warranty_years".to_string(), MetadataValue::Int(5)),
            ]),
            created_at: now,
            updated_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_parts_returns_only_existing_ids() {
        let service = InMemoryInventoryService::with_default_catalog();
        let unknown = PartId::new();

        let snapshots = service
            .list_parts(&[HYPERDRIVE_ENGINE_ID, unknown])
            .await
            .unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, HYPERDRIVE_ENGINE_ID);
        assert_eq!(snapshots[0].price, Money::from_units(450_000));
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_list_parts_with_no_ids_returns_nothing() {
        let service = InMemoryInventoryService::with_default_catalog();
        let snapshots = service.list_parts(&[]).await.unwrap();
        assert!(snapshots.is_empty());
    }

    #[tokio::test]
    async fn test_fail_on_list() {
        let service = InMemoryInventoryService::with_default_catalog();
        service.set_fail_on_list(true);

        let result = service.list_parts(&[QUANTUM_SHIELD_ID]).await;
        assert!(matches!(result, Err(GatewayError::Unavailable(_))));
    }

    #[test]
    fn test_find_parts_by_category_and_tag() {
        let service = InMemoryInventoryService::with_default_catalog();

        let engines = service.find_parts(&PartsFilter {
            categories: vec![Category::Engine],
            ..PartsFilter::default()
        });
        assert_eq!(engines.len(), 1);
        assert_eq!(engines[0].name, "Hyperdrive Engine");

        let quantum = service.find_parts(&PartsFilter {
            tags: vec!["quantum".to_string()],
            manufacturer_countries: vec!["Germany".to_string()],
            ..PartsFilter::default()
        });
        assert_eq!(quantum.len(), 1);
        assert_eq!(quantum[0].id, QUANTUM_SHIELD_ID);

        assert_eq!(service.find_parts(&PartsFilter::default()).len(), 2);
    }

    #[test]
    fn test_get_part() {
        let service = InMemoryInventoryService::with_default_catalog();
        assert!(service.get_part(QUANTUM_SHIELD_ID).is_some());
        assert!(service.get_part(PartId::new()).is_none());
    }

    #[test]
    fn test_seed_ids_match_catalog_uuids() {
        assert_eq!(
            HYPERDRIVE_ENGINE_ID.to_string(),
            "111e4567-e89b-12d3-a456-426614174001"
        );
        assert_eq!(
            QUANTUM_SHIELD_ID.to_string(),
            "222e4567-e89b-12d3-a456-426614174002"
        );
    }
}
