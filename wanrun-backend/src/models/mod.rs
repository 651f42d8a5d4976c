mod bookmark;
mod checkin;
mod dog;
mod dogrun;
mod session;

pub use bookmark::Bookmark;
pub use checkin::DogrunCheckin;
pub use dog::{Dog, DogOwner};
pub use dogrun::Dogrun;
pub use session::Session;
