mod api_tests;

use crate::auth::jwt::JwtService;
use crate::core::access::Actor;
use crate::core::models::{Direction, Members, NewTransaction, Party, PartyType, Transaction, Workspace};
use crate::core::services::LedgerService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::time::Duration;

pub const TEST_SECRET: &str = "test-secret";

pub fn create_test_service() -> LedgerService<InMemoryStorage, InMemoryCache> {
    let storage = InMemoryStorage::new();
    let cache = InMemoryCache::new();
    let jwt_service = JwtService::new(TEST_SECRET.to_string(), Duration::from_secs(3600));
    LedgerService::new(storage, cache, jwt_service).with_bcrypt_cost(4)
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap()
}

pub fn workspace(id: &str, owner_id: &str, members: &[&str]) -> Workspace {
    Workspace {
        id: id.to_string(),
        name: "Shop".to_string(),
        owner_id: owner_id.to_string(),
        members: members.iter().copied().collect::<Members>(),
        created_at: day(1),
    }
}

pub fn party(id: &str, workspace_id: &str, party_type: PartyType) -> Party {
    Party {
        id: id.to_string(),
        workspace_id: workspace_id.to_string(),
        name: format!("Party {}", id),
        phone: None,
        party_type,
        created_at: day(1),
    }
}

pub fn tx(id: &str, party: &Party, direction: Direction, amount: Decimal, on: u32) -> Transaction {
    Transaction {
        id: id.to_string(),
        workspace_id: party.workspace_id.clone(),
        party_id: party.id.clone(),
        amount,
        direction,
        description: None,
        date: day(on),
        bill_image_url: None,
        created_by: "u1".to_string(),
        created_at: day(on),
        updated_at: day(on),
    }
}

/// Registers a user and returns the actor their token would carry.
pub async fn register_actor(service: &LedgerService<InMemoryStorage, InMemoryCache>, email: &str) -> Actor {
    let auth = service.register(email, "Test User", "password123").await.unwrap();
    service.validate_token(&auth.token).unwrap().actor()
}

pub async fn record(
    service: &LedgerService<InMemoryStorage, InMemoryCache>,
    actor: &Actor,
    workspace_id: &str,
    party_id: &str,
    direction: Direction,
    amount: Decimal,
    on: u32,
) -> Transaction {
    service
        .create_transaction(
            actor,
            Some(workspace_id),
            party_id,
            NewTransaction {
                amount,
                direction,
                description: None,
                date: day(on),
                bill_image_url: None,
            },
        )
        .await
        .unwrap()
}
