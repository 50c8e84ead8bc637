//! Persistence collaborator interface.
//!
//! Durable user storage is outside this crate; the engine only depends on
//! the [`UserStore`] trait. [`MemoryStore`] is a minimal in-process
//! implementation used by tests and demos.

use crate::applicant::Applicant;
use crate::postprocess::RiskCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored applicant record with its computed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredUser {
    /// Store-assigned identifier.
    pub id: u64,
    /// The applicant profile as submitted.
    pub applicant: Applicant,
    /// Bounded credit score at the time of scoring.
    pub credit_score: i32,
    /// Risk category derived from the score.
    pub risk_category: RiskCategory,
}

/// Interface the scoring engine consumes from persistence.
pub trait UserStore {
    /// Looks up a user id by exact name.
    fn find_user_id_by_name(&self, name: &str) -> Option<u64>;

    /// Creates a new record and returns its id.
    fn create_user(&mut self, applicant: &Applicant, score: i32, risk: RiskCategory) -> u64;

    /// Replaces the record with the given id. Returns false if it does not
    /// exist.
    fn update_user(
        &mut self,
        id: u64,
        applicant: &Applicant,
        score: i32,
        risk: RiskCategory,
    ) -> bool;

    /// All stored records.
    fn get_all_users(&self) -> Vec<ScoredUser>;

    /// One record by id.
    fn get_user(&self, id: u64) -> Option<ScoredUser>;
}

/// In-memory `UserStore` with sequential ids.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: BTreeMap<u64, ScoredUser>,
    next_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserStore for MemoryStore {
    fn find_user_id_by_name(&self, name: &str) -> Option<u64> {
        self.users
            .values()
            .find(|u| u.applicant.name == name)
            .map(|u| u.id)
    }

    fn create_user(&mut self, applicant: &Applicant, score: i32, risk: RiskCategory) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.users.insert(
            id,
            ScoredUser {
                id,
                applicant: applicant.clone(),
                credit_score: score,
                risk_category: risk,
            },
        );
        id
    }

    fn update_user(
        &mut self,
        id: u64,
        applicant: &Applicant,
        score: i32,
        risk: RiskCategory,
    ) -> bool {
        match self.users.get_mut(&id) {
            Some(user) => {
                user.applicant = applicant.clone();
                user.credit_score = score;
                user.risk_category = risk;
                true
            }
            None => false,
        }
    }

    fn get_all_users(&self) -> Vec<ScoredUser> {
        self.users.values().cloned().collect()
    }

    fn get_user(&self, id: u64) -> Option<ScoredUser> {
        self.users.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::IncomeTier;

    fn applicant(name: &str) -> Applicant {
        Applicant::new(name, 30).with_income(IncomeTier::Medium, 40000.0)
    }

    #[test]
    fn test_create_and_get() {
        let mut store = MemoryStore::new();
        let id = store.create_user(&applicant("Asha"), 680, RiskCategory::Medium);

        let user = store.get_user(id).expect("created user should exist");
        assert_eq!(user.applicant.name, "Asha");
        assert_eq!(user.credit_score, 680);
        assert_eq!(user.risk_category, RiskCategory::Medium);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_find_by_name() {
        let mut store = MemoryStore::new();
        let id = store.create_user(&applicant("Ravi"), 710, RiskCategory::Low);

        assert_eq!(store.find_user_id_by_name("Ravi"), Some(id));
        assert_eq!(store.find_user_id_by_name("Unknown"), None);
    }

    #[test]
    fn test_update_existing_and_missing() {
        let mut store = MemoryStore::new();
        let id = store.create_user(&applicant("Meera"), 580, RiskCategory::High);

        let updated = store.update_user(id, &applicant("Meera"), 640, RiskCategory::Medium);
        assert!(updated);
        assert_eq!(
            store.get_user(id).expect("user should exist").credit_score,
            640
        );

        assert!(!store.update_user(999, &applicant("Meera"), 640, RiskCategory::Medium));
    }

    #[test]
    fn test_get_all_users_ordered_by_id() {
        let mut store = MemoryStore::new();
        store.create_user(&applicant("A"), 600, RiskCategory::Medium);
        store.create_user(&applicant("B"), 700, RiskCategory::Low);

        let all = store.get_all_users();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }
}
