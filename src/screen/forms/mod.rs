// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One edit form per resource kind

pub mod activities;
pub mod teams;
pub mod users;
pub mod workouts;

pub use activities::ActivityForm;
pub use teams::TeamForm;
pub use users::UserForm;
pub use workouts::WorkoutForm;
