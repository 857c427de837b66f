use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

/// In-process store backing the router tests.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_with_email(&self, email: &str) -> usize {
        self.users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Toin".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.create(new_user("toin@email.com")).await.expect("first insert");
        let err = store.create(new_user("toin@email.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));
        assert_eq!(store.count_with_email("toin@email.com"), 1);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("a@email.com")).await.expect("insert a");
        let b = store.create(new_user("b@email.com")).await.expect("insert b");
        let ids: Vec<Uuid> = store.list().await.expect("list").iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
