pub mod book;
pub mod response;
pub mod user;

pub use book::*;
pub use response::*;
pub use user::*;
