//! In-process registration store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ListPage, RegistrationStore, StoreError};
use crate::domain::{
    NewRegistration, Page, Registration, RegistrationFilter, RegistrationId, TShirtSize,
};

/// Registration store backed by a `Vec` behind a [`tokio::sync::RwLock`].
///
/// Used when persistence is disabled and by tests. Contents are lost on
/// restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Registration>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Returns a copy of every stored record in insertion order.
    pub async fn snapshot(&self) -> Vec<Registration> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.details.email == email).cloned())
    }

    async fn insert_many(
        &self,
        records: Vec<NewRegistration>,
    ) -> Result<Vec<Registration>, StoreError> {
        let now = Utc::now();
        let stored: Vec<Registration> = records
            .into_iter()
            .map(|details| Registration::stamp(details, RegistrationId::new(), now))
            .collect();
        self.records.write().await.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn list(
        &self,
        filter: &RegistrationFilter,
        page: Page,
    ) -> Result<ListPage, StoreError> {
        let records = self.records.read().await;
        // Reverse first so equal timestamps list the latest insert first.
        let mut matching: Vec<&Registration> =
            records.iter().rev().filter(|r| filter.matches(r)).collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(a.details.team_member_index.cmp(&b.details.team_member_index))
        });

        let total = matching.len() as u64;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let page_records = matching
            .into_iter()
            .skip(skip)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok(ListPage {
            records: page_records,
            total,
        })
    }

    async fn update_tshirt_size(
        &self,
        id: RegistrationId,
        size: Option<TShirtSize>,
    ) -> Result<Option<Registration>, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        record.details.tshirt_size = size;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: RegistrationId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{RaceCategory, TeamId};

    fn draft(name: &str, email: &str) -> NewRegistration {
        NewRegistration {
            name: name.to_string(),
            email: email.to_string(),
            contact: "123".to_string(),
            gender: "Male".to_string(),
            birthday: "2000-01-01".to_string(),
            race_category: RaceCategory::Individual,
            affiliations: String::new(),
            promotional: false,
            tshirt_size: Some(TShirtSize::M),
            team_id: None,
            team_member_index: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let Ok(stored) = store
            .insert_many(vec![draft("A", "a@x.com"), draft("B", "b@x.com")])
            .await
        else {
            panic!("insert failed");
        };
        assert_eq!(stored.len(), 2);
        assert!(stored.windows(2).all(|w| matches!(w, [a, b] if a.id != b.id)));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn find_by_email_is_exact() {
        let store = MemoryStore::new();
        let _ = store.insert_many(vec![draft("A", "a@x.com")]).await;

        assert!(matches!(store.find_by_email("a@x.com").await, Ok(Some(_))));
        assert!(matches!(store.find_by_email("A@X.COM").await, Ok(None)));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() {
        let store = MemoryStore::new();
        for i in 0..5 {
            let _ = store
                .insert_many(vec![draft(&format!("R{i}"), &format!("r{i}@x.com"))])
                .await;
        }

        let Ok(first) = store.list(&RegistrationFilter::default(), Page::new(1, 2)).await else {
            panic!("list failed");
        };
        assert_eq!(first.total, 5);
        let names: Vec<_> = first.records.iter().map(|r| r.details.name.as_str()).collect();
        assert_eq!(names, vec!["R4", "R3"]);

        let Ok(last) = store.list(&RegistrationFilter::default(), Page::new(3, 2)).await else {
            panic!("list failed");
        };
        assert_eq!(last.records.len(), 1);
    }

    #[tokio::test]
    async fn team_members_list_in_index_order() {
        let store = MemoryStore::new();
        let team_id = TeamId::new();
        let members = (1..=4)
            .map(|i| NewRegistration {
                team_id: Some(team_id),
                team_member_index: Some(i),
                race_category: RaceCategory::Team,
                ..draft(&format!("M{i}"), "team@x.com")
            })
            .collect();
        let _ = store.insert_many(members).await;

        let Ok(page) = store.list(&RegistrationFilter::default(), Page::default()).await else {
            panic!("list failed");
        };
        let indices: Vec<_> = page
            .records
            .iter()
            .filter_map(|r| r.details.team_member_index)
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() {
        let store = MemoryStore::new();
        let Ok(stored) = store.insert_many(vec![draft("A", "a@x.com")]).await else {
            panic!("insert failed");
        };
        let Some(id) = stored.first().map(|r| r.id) else {
            panic!("expected a record");
        };

        let Ok(Some(updated)) = store.update_tshirt_size(id, None).await else {
            panic!("update failed");
        };
        assert_eq!(updated.details.tshirt_size, None);
        assert!(updated.updated_at >= updated.created_at);

        assert!(matches!(
            store.update_tshirt_size(RegistrationId::new(), None).await,
            Ok(None)
        ));
        assert!(matches!(store.delete(id).await, Ok(true)));
        assert!(matches!(store.delete(id).await, Ok(false)));
        assert!(store.is_empty().await);
    }
}
