// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Entity Screens
//!
//! One [`CrudScreen`] per resource kind holds the loaded list, the open
//! edit form and the pending delete confirmation.
//!
//! ## Modules
//!
//! - [`controller`]: the list/edit/delete state machine
//! - [`form`]: the form contract and validation helpers
//! - [`forms`]: one form per resource kind
//! - [`display`]: derived display fields and tabular rows

pub mod controller;
pub mod display;
pub mod form;
pub mod forms;

pub use controller::{CrudScreen, DeleteOutcome, Editor, ListState, ScreenError, SubmitOutcome};
pub use display::{BadgeVariant, DisplayRow};
pub use form::{EditMode, EntityForm, FieldErrors, FormError, ScreenKind};
pub use forms::{ActivityForm, TeamForm, UserForm, WorkoutForm};
