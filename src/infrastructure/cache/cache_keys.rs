use crate::core::models::PartyType;

pub fn party_totals_key(workspace_id: &str, party_type: Option<PartyType>) -> String {
    match party_type {
        Some(t) => format!("party_totals:{}:{}", workspace_id, t),
        None => format!("party_totals:{}:all", workspace_id),
    }
}

pub fn workspace_prefix(workspace_id: &str) -> String {
    format!("party_totals:{}:", workspace_id)
}
