use std::fmt;
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(pub Uuid);

impl Id {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user. The username doubles as the contact e-mail address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl User {
    /// The address reminders are sent to, if the username looks like one.
    pub fn email(&self) -> Option<&str> {
        if self.username.contains('@') {
            Some(&self.username)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: Id) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            name: self.name,
        }
    }
}
