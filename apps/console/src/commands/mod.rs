//! # Menu Commands
//!
//! One handler per menu entry. Every handler that acts for a logged-in user
//! calls [`guard::authorize`](crate::guard::authorize) first, then reads its
//! input, then talks to the database.
//!
//! ```text
//! commands/
//! ├── account.rs   ◄─── create user, log in
//! ├── profile.rs   ◄─── view / update own profile
//! ├── catalog.rs   ◄─── browse, update, add games
//! ├── orders.rs    ◄─── place order, history, order detail
//! ├── tracking.rs  ◄─── view / update tracking
//! └── users.rs     ◄─── manager user edit
//! ```

pub mod account;
pub mod catalog;
pub mod orders;
pub mod profile;
pub mod tracking;
pub mod users;

/// Result type of every handler.
pub type CommandResult<T = ()> = Result<T, crate::error::ApiError>;
