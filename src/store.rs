use std::collections::HashMap;

use crate::types::{Message, User};

///
/// In-memory record store, the entire persistence layer.
///
/// Built once at process start from injected seed data and never mutated
/// afterwards, so it can be shared between requests without locking.
///
#[derive(Debug, Default)]
pub struct Store {
    users: HashMap<String, User>,
    messages: HashMap<String, Message>,
}

impl Store {
    pub fn new(users: Vec<User>, messages: Vec<Message>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.id.to_owned(), user))
                .collect(),
            messages: messages
                .into_iter()
                .map(|message| (message.id.to_owned(), message))
                .collect(),
        }
    }

    ///
    /// The fixture data set served by the demo binary.
    ///
    pub fn demo() -> Self {
        Self::new(
            vec![
                User::new("1", "Britney Smith"),
                User::new("2", "Zazie Beetz"),
            ],
            vec![
                Message::new("1", "Hello World", "1"),
                Message::new("2", "Bye World", "2"),
            ],
        )
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    ///
    /// All users, in mapping iteration order.
    ///
    pub fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    ///
    /// All messages, in mapping iteration order.
    ///
    pub fn messages(&self) -> Vec<Message> {
        self.messages.values().cloned().collect()
    }

    ///
    /// Messages belonging to the given user. Linear scan; the data set is
    /// tiny and no index is kept.
    ///
    pub fn messages_of(&self, user_id: &str) -> Vec<Message> {
        self.messages
            .values()
            .filter(|message| message.user_id == user_id)
            .cloned()
            .collect()
    }
}
