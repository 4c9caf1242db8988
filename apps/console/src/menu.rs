//! # Menu Loop
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  START MENU                        USER MENU (after login)              │
//! │  1. Create user                    1..8   views and order placement     │
//! │  2. Log in ──────────────────────► 9      update tracking  (employee+)  │
//! │  9. Exit                           10-12  catalog / users  (manager)    │
//! │                                    20     log out ──► START MENU        │
//! │                                                                         │
//! │  Handler error ──► "Error: <message>", menu shown again                 │
//! │  End of input  ──► session ends                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use rental_db::Database;
use tracing::{info, warn};

use crate::commands::{account, catalog, orders, profile, tracking, users, CommandResult};
use crate::console::Console;
use crate::guard::Session;

/// Entries of the logged-in menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    ViewProfile,
    UpdateProfile,
    ViewCatalog,
    PlaceOrder,
    ViewAllOrders,
    ViewRecentOrders,
    ViewOrderInfo,
    ViewTrackingInfo,
    UpdateTrackingInfo,
    UpdateCatalog,
    UpdateUser,
    AddGame,
    LogOut,
}

impl UserAction {
    pub fn from_choice(choice: i32) -> Option<Self> {
        Some(match choice {
            1 => UserAction::ViewProfile,
            2 => UserAction::UpdateProfile,
            3 => UserAction::ViewCatalog,
            4 => UserAction::PlaceOrder,
            5 => UserAction::ViewAllOrders,
            6 => UserAction::ViewRecentOrders,
            7 => UserAction::ViewOrderInfo,
            8 => UserAction::ViewTrackingInfo,
            9 => UserAction::UpdateTrackingInfo,
            10 => UserAction::UpdateCatalog,
            11 => UserAction::UpdateUser,
            12 => UserAction::AddGame,
            20 => UserAction::LogOut,
            _ => return None,
        })
    }
}

fn greeting<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("")?;
    console.say("*******************************************************")?;
    console.say("                 Game Rental Store")?;
    console.say("*******************************************************")
}

fn start_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("MAIN MENU")?;
    console.say("---------")?;
    console.say("1. Create user")?;
    console.say("2. Log in")?;
    console.say("9. < EXIT")
}

fn user_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("MAIN MENU")?;
    console.say("---------")?;
    console.say("1. View Profile")?;
    console.say("2. Update Profile")?;
    console.say("3. View Catalog")?;
    console.say("4. Place Rental Order")?;
    console.say("5. View Full Rental Order History")?;
    console.say("6. View Past 5 Rental Orders")?;
    console.say("7. View Rental Order Information")?;
    console.say("8. View Tracking Information")?;
    console.say("9. Update Tracking Information")?;
    console.say("10. Update Catalog")?;
    console.say("11. Update User")?;
    console.say("12. Add Game to Catalog")?;
    console.say(".........................")?;
    console.say("20. Log out")
}

/// Prints a handler failure and keeps the session going.
fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, result: CommandResult) -> io::Result<()> {
    if let Err(e) = result {
        warn!(code = ?e.code, message = %e.message, "Action failed");
        console.say(format!("Error: {}", e.message))?;
    }
    Ok(())
}

/// Runs the interactive session until exit or end of input.
pub async fn run<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> io::Result<()> {
    greeting(console)?;

    loop {
        start_menu(console)?;

        let Some(choice) = console.read_choice()? else {
            break;
        };

        match choice {
            1 => {
                let result = account::create_user(db, console).await;
                report(console, result)?;
            }
            2 => match account::log_in(db, console).await {
                Ok(Some(session)) => session_loop(db, &session, console).await?,
                Ok(None) => {}
                Err(e) => report(console, Err(e))?,
            },
            9 => break,
            _ => console.say("Unrecognized choice!")?,
        }

        if console.at_eof() {
            break;
        }
    }

    Ok(())
}

async fn session_loop<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    loop {
        user_menu(console)?;

        let Some(choice) = console.read_choice()? else {
            return Ok(());
        };

        let Some(action) = UserAction::from_choice(choice) else {
            console.say("Unrecognized choice!")?;
            continue;
        };

        let result = match action {
            UserAction::ViewProfile => profile::view_profile(db, session, console).await,
            UserAction::UpdateProfile => profile::update_profile(db, session, console).await,
            UserAction::ViewCatalog => catalog::view_catalog(db, session, console).await,
            UserAction::PlaceOrder => orders::place_order(db, session, console).await,
            UserAction::ViewAllOrders => orders::view_all_orders(db, session, console).await,
            UserAction::ViewRecentOrders => orders::view_recent_orders(db, session, console).await,
            UserAction::ViewOrderInfo => orders::view_order_info(db, session, console).await,
            UserAction::ViewTrackingInfo => {
                tracking::view_tracking_info(db, session, console).await
            }
            UserAction::UpdateTrackingInfo => {
                tracking::update_tracking_info(db, session, console).await
            }
            UserAction::UpdateCatalog => catalog::update_catalog(db, session, console).await,
            UserAction::UpdateUser => users::update_user(db, session, console).await,
            UserAction::AddGame => catalog::add_game(db, session, console).await,
            UserAction::LogOut => {
                info!(login = %session.login, "Logged out");
                return Ok(());
            }
        };
        report(console, result)?;

        if console.at_eof() {
            return Ok(());
        }
    }
}
