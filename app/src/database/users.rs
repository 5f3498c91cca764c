use super::{Database, Tables};
use crate::user::{self, NewUser, User};

impl Tables {
    /// Username uniqueness is enforced here, under the same write as the insert.
    pub(crate) fn create_user(&mut self, new: NewUser) -> Result<User, user::Error> {
        if self.get_user_by_username(&new.username).is_some() {
            return Err(user::Error::UsernameTaken);
        }
        let user = new.into_user(user::Id::generate());
        self.insert_user(user.clone());
        Ok(user)
    }

    pub(super) fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub(crate) fn get_user(&self, id: user::Id) -> Option<User> {
        self.users.get(&id).cloned()
    }

    pub(crate) fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }
}

impl Database {
    pub async fn create_user(&self, new: NewUser) -> Result<User, user::Error> {
        self.write().await.create_user(new)
    }

    pub async fn get_user(&self, id: user::Id) -> Option<User> {
        self.read().await.get_user(id)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.read().await.get_user_by_username(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::fixtures;

    #[tokio::test]
    async fn finds_users_by_id_and_username() {
        let db = Database::default();
        let user = fixtures::user(&db, "a@b.com").await;
        assert_eq!(db.get_user(user.id).await, Some(user.clone()));
        assert_eq!(db.get_user_by_username("a@b.com").await, Some(user));
        assert_eq!(db.get_user_by_username("c@d.com").await, None);
        assert_eq!(db.get_user(user::Id::generate()).await, None);
    }

    #[tokio::test]
    async fn duplicate_username_leaves_store_unchanged() {
        let db = Database::default();
        let first = fixtures::user(&db, "a@b.com").await;
        let result = db
            .create_user(NewUser {
                username: "a@b.com".to_owned(),
                password: "other".to_owned(),
                name: "Other".to_owned(),
            })
            .await;
        assert_eq!(result, Err(user::Error::UsernameTaken));
        assert_eq!(db.read().await.users.len(), 1);
        assert_eq!(db.get_user_by_username("a@b.com").await, Some(first));
    }

    #[tokio::test]
    async fn generated_ids_are_unique() {
        let db = Database::default();
        let a = fixtures::user(&db, "a@b.com").await;
        let b = fixtures::user(&db, "b@b.com").await;
        assert_ne!(a.id, b.id);
    }
}
