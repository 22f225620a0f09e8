use juniper::{graphql_value, EmptyMutation, FieldError, FieldResult};

use crate::context::Context;
use crate::types::{Message, User};

pub struct Query;

#[juniper::object(Context = Context)]
impl Query {
    ///
    /// Get all users
    ///
    fn users(context: &Context) -> FieldResult<Option<Vec<User>>> {
        Ok(Some(context.store.users()))
    }

    ///
    /// Get user by id, null if there is none
    ///
    fn user(context: &Context, id: String) -> FieldResult<Option<User>> {
        Ok(context.store.user(&id).map(User::to_owned))
    }

    ///
    /// The current user of this request, null if none was selected
    ///
    fn me(context: &Context) -> FieldResult<Option<User>> {
        Ok(context.viewer.to_owned())
    }

    ///
    /// Get all messages
    ///
    fn messages(context: &Context) -> FieldResult<Vec<Message>> {
        Ok(context.store.messages())
    }

    ///
    /// Get message by id. The field is non-null, so an unknown id is an
    /// execution error rather than a null result.
    ///
    fn message(context: &Context, id: String) -> FieldResult<Message> {
        match context.store.message(&id) {
            Some(message) => Ok(message.to_owned()),
            None => Err(FieldError::new(
                format!("No message with id {}", id),
                graphql_value!(None),
            )),
        }
    }
}

pub type Schema = juniper::RootNode<'static, Query, EmptyMutation<Context>>;

pub fn schema() -> Schema {
    Schema::new(Query, EmptyMutation::new())
}
