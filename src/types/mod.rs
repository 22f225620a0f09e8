pub mod message;
pub mod user;

pub use self::message::Message;
pub use self::user::User;
