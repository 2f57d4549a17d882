mod athlete;
mod category;
mod training_center;
mod user;

pub use athlete::{Athlete, AthleteDetail};
pub use category::Category;
pub use training_center::TrainingCenter;
pub use user::User;
