use std::sync::Arc;

use crate::store::Store;
use crate::types::User;

///
/// Context for Juniper
///
/// Built by the transport layer once per request and passed unchanged to
/// every resolver invocation in that request's resolution tree.
///
pub struct Context {
    /// shared record store
    pub store: Arc<Store>,
    /// the current user answering `me`, if any was selected for this request
    pub viewer: Option<User>,
}

impl juniper::Context for Context {}

impl Context {
    pub fn new(store: Arc<Store>, viewer: Option<User>) -> Self {
        Self { store, viewer }
    }
}
