use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;

#[derive(Debug, Clone)]
pub enum Actor {
    User(Uuid),
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    Comment,
    Admin,
}

// Presentation layer is responsible for building Actor from HTTP inputs.
// This module intentionally avoids depending on presentation types.

/// The earliest-registered user administers the site; any other signed-in
/// user may comment; everyone else only reads.
pub async fn resolve<R>(users: &R, actor: &Actor) -> Capability
where
    R: UserRepository + ?Sized,
{
    match actor {
        Actor::User(uid) => {
            let first = users.first_user_id().await.unwrap_or(None);
            if first == Some(*uid) {
                Capability::Admin
            } else {
                Capability::Comment
            }
        }
        Actor::Anonymous => Capability::None,
    }
}
