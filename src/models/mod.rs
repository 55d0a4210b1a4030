//! Autotask entity model types.

mod company;
mod contact;
mod resource;
mod ticket;
mod user_defined;

pub use company::*;
pub use contact::*;
pub use resource::*;
pub use ticket::*;
pub use user_defined::*;
