
pub mod user;
pub mod feedback;

pub use user::*;
pub use feedback::*;
