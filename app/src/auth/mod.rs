use crate::{database::Database, user};
use std::str::FromStr;
use uuid::Uuid;

mod entities;

pub use entities::{AccessDenied, Grant};

pub async fn get_grant(db: &Database, user_id: &str) -> Result<Grant, AccessDenied> {
    let user_id = user::Id(Uuid::from_str(user_id).map_err(|_| AccessDenied)?);
    db.get_user(user_id).await.ok_or(AccessDenied)?;
    Ok(Grant { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::NewUser;

    #[tokio::test]
    async fn grant_requires_registered_user() {
        let db = Database::default();
        let user = db
            .create_user(NewUser {
                username: "a@b.com".to_owned(),
                password: "secret".to_owned(),
                name: "A".to_owned(),
            })
            .await
            .unwrap();

        let grant = get_grant(&db, &user.id.to_string()).await.unwrap();
        assert_eq!(grant.user_id, user.id);
        assert!(get_grant(&db, &Uuid::new_v4().to_string()).await.is_err());
        assert!(get_grant(&db, "not-a-uuid").await.is_err());
    }
}
