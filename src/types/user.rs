use juniper::FieldResult;

use crate::context::Context;
use crate::types::Message;

///
/// GraphQL type for a user
///
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    /// unique identification of user
    pub id: String,
    /// display name of user
    pub username: String,
}

impl User {
    pub fn new<S: Into<String>>(id: S, username: S) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

#[juniper::object(Context = Context)]
impl User {
    fn id(&self) -> &str {
        &self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    ///
    /// All messages written by this user
    ///
    fn messages(&self, context: &Context) -> FieldResult<Option<Vec<Message>>> {
        Ok(Some(context.store.messages_of(&self.id)))
    }
}
