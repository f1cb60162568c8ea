// src/services/mod.rs
//
// Domain logic over the entity store. Handlers stay thin: they extract the
// acting user from the request and delegate here. Every mutating operation
// takes the acting user id explicitly and validates it against the expected
// role, so actor checks live next to the state they protect.

pub mod conversations;
pub mod feedback;
pub mod swaps;
pub mod users;

#[cfg(test)]
pub(crate) mod testutil {
    use crate::models::user::{Skill, User};
    use crate::store::{Store, USERS};

    pub fn skill(id: &str, name: &str) -> Skill {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            reference_url: None,
        }
    }

    pub fn member(id: &str, name: &str, email: &str, offered: Vec<Skill>) -> User {
        let mut user = User::new(
            name.to_string(),
            email.to_string(),
            "password123".to_string(),
            None,
        );
        user.id = id.to_string();
        user.skills_offered = offered;
        user
    }

    /// An in-memory store holding alice (offers React Development, id "1")
    /// and bob (offers Digital Marketing, id "4").
    pub async fn store_with_two_members() -> Store {
        let store = Store::in_memory();
        let alice = member(
            "alice",
            "Alice Example",
            "alice@example.com",
            vec![skill("1", "React Development")],
        );
        let bob = member(
            "bob",
            "Bob Example",
            "bob@example.com",
            vec![skill("4", "Digital Marketing")],
        );
        store.save(USERS, &[alice, bob]).await.unwrap();
        store
    }
}
