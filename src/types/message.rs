use juniper::{graphql_value, FieldError, FieldResult};

use crate::context::Context;
use crate::types::User;

///
/// GraphQL type for a message
///
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// unique identification of message
    pub id: String,
    /// message body
    pub text: String,
    /// id of the user who wrote the message
    pub user_id: String,
}

impl Message {
    pub fn new<S: Into<String>>(id: S, text: S, user_id: S) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            user_id: user_id.into(),
        }
    }
}

#[juniper::object(Context = Context)]
impl Message {
    fn id(&self) -> &str {
        &self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    ///
    /// The user who wrote this message. The field is non-null, so a message
    /// pointing at a user id that is not in the store is an execution error.
    ///
    fn user(&self, context: &Context) -> FieldResult<User> {
        match context.store.user(&self.user_id) {
            Some(user) => Ok(user.to_owned()),
            None => Err(FieldError::new(
                format!("No user with id {}", self.user_id),
                graphql_value!(None),
            )),
        }
    }
}
