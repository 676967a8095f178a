// 🧭 Command Loops - one menu-driven loop per desk
//
// Each loop reads a numbered choice, prompts for the fields of that
// operation, dispatches into the system, and prints either the success line
// or `Error: <message>`. Failures never leave partial state behind, because
// every system operation validates before it mutates.
//
// EOF on any prompt winds the loop down cleanly. Non-numeric input where a
// number is expected reprompts (see `Console::number`) instead of aborting.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::betting::{BettingSystem, Game};
use crate::console::{money, Console};
use crate::shopping::{Product, ShoppingSystem};
use crate::traffic::{TrafficSystem, Violation};

/// Prints the success line on `Ok`, `Error: <message>` otherwise.
fn outcome<R, W, E>(
    console: &mut Console<R, W>,
    result: Result<(), E>,
    success: &str,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: std::fmt::Display,
{
    match result {
        Ok(()) => console.say(success),
        Err(e) => console.say(&format!("Error: {}", e)),
    }
}

// ============================================================================
// BETTING DESK
// ============================================================================

pub fn run_betting<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let mut system = BettingSystem::new();
    console.say("Welcome to the Online Betting Management System!")?;

    loop {
        let Some(choice) = console.menu(&[
            "Admin - Add Game",
            "Admin - Remove Game",
            "User - Register",
            "User - Place Bet",
            "User - View Bet History",
            "Exit",
        ])?
        else {
            break;
        };

        match choice {
            1 => {
                let Some(game_id) = console.line("Enter Game ID: ")? else { break };
                let Some(game_name) = console.line("Enter Game Name: ")? else { break };
                outcome(
                    console,
                    system.add_game(Game::new(&game_id, &game_name)),
                    "Game added successfully!",
                )?;
            }
            2 => {
                let Some(game_id) = console.line("Enter Game ID to Remove: ")? else { break };
                outcome(
                    console,
                    system.remove_game(&game_id).map(|_| ()),
                    "Game removed successfully!",
                )?;
            }
            3 => {
                let Some(username) = console.line("Enter Username: ")? else { break };
                let Some(password) = console.line("Enter Password: ")? else { break };
                let Some(balance) = console.number::<f64>("Enter Initial Balance: ")? else {
                    break;
                };
                outcome(
                    console,
                    system.register_user(&username, &password, balance),
                    "User registered successfully!",
                )?;
            }
            4 => {
                let Some(username) = console.line("Enter Username: ")? else { break };
                let Some(game_id) = console.line("Enter Game ID to Bet On: ")? else { break };
                let Some(amount) = console.number::<f64>("Enter Bet Amount: ")? else { break };
                outcome(
                    console,
                    system.place_bet(&username, &game_id, amount),
                    "Bet placed successfully!",
                )?;
            }
            5 => {
                let Some(username) = console.line("Enter Username: ")? else { break };
                match system.bet_history(&username) {
                    Ok(bets) => {
                        console.say("Bet History:")?;
                        for bet in bets {
                            console.say(&format!(
                                "Game ID: {}, Bet Amount: ${}",
                                bet.game_id,
                                money(bet.amount)
                            ))?;
                        }
                    }
                    Err(e) => console.say(&format!("Error: {}", e))?,
                }
            }
            6 => {
                console.say("Exiting the system. Goodbye!")?;
                break;
            }
            _ => console.say("Invalid option. Please try again.")?,
        }
    }

    Ok(())
}

// ============================================================================
// SHOPPING DESK
// ============================================================================

pub fn run_shopping<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let mut system = ShoppingSystem::new();
    console.say("Welcome to the Online Shopping System!")?;

    loop {
        let Some(choice) = console.menu(&[
            "Register Customer",
            "Add Product to Cart",
            "Remove Product from Cart",
            "View Cart",
            "Make Payment",
            "Exit",
        ])?
        else {
            break;
        };

        match choice {
            1 => {
                let Some(user_id) = console.number::<u32>("Enter User ID: ")? else { break };
                let Some(name) = console.line("Enter Name: ")? else { break };
                let Some(email) = console.line("Enter Email: ")? else { break };
                let Some(password) = console.line("Enter Password: ")? else { break };
                let Some(address) = console.line("Enter Address: ")? else { break };
                outcome(
                    console,
                    system.register_customer(user_id, &name, &email, &password, &address),
                    "Customer registered successfully!",
                )?;
            }
            2 => {
                let Some(user_id) = console.number::<u32>("Enter User ID: ")? else { break };
                // Existence check before the product prompts, so an unknown
                // customer fails immediately.
                if let Err(e) = system.customer(user_id) {
                    console.say(&format!("Error: {}", e))?;
                    continue;
                }
                let Some(product_id) = console.number::<u32>("Enter Product ID: ")? else {
                    break;
                };
                let Some(product_name) = console.line("Enter Product Name: ")? else { break };
                let Some(price) = console.number::<f64>("Enter Product Price: ")? else { break };
                let Some(warranty) =
                    console.number::<u32>("Enter Warranty Period (in months): ")?
                else {
                    break;
                };
                let result = Product::electronics(product_id, &product_name, price, warranty)
                    .and_then(|product| system.add_to_cart(user_id, product));
                outcome(console, result, "Product added to cart!")?;
            }
            3 => {
                let Some(user_id) = console.number::<u32>("Enter User ID: ")? else { break };
                if let Err(e) = system.customer(user_id) {
                    console.say(&format!("Error: {}", e))?;
                    continue;
                }
                let Some(product_id) = console.number::<u32>("Enter Product ID to Remove: ")?
                else {
                    break;
                };
                outcome(
                    console,
                    system.remove_from_cart(user_id, product_id).map(|_| ()),
                    "Product removed from cart!",
                )?;
            }
            4 => {
                let Some(user_id) = console.number::<u32>("Enter User ID: ")? else { break };
                match system.view_cart(user_id) {
                    Ok(cart) => {
                        console.say("Cart Items:")?;
                        for product in cart {
                            let line = product.details();
                            console.say(&line)?;
                        }
                    }
                    Err(e) => console.say(&format!("Error: {}", e))?,
                }
            }
            5 => {
                let Some(user_id) = console.number::<u32>("Enter User ID: ")? else { break };
                match system.pay(user_id) {
                    Ok(total) => {
                        console.say(&format!(
                            "Payment of ${} processed successfully!",
                            money(total)
                        ))?;
                        console.say("Payment completed!")?;
                    }
                    Err(e) => console.say(&format!("Error: {}", e))?,
                }
            }
            6 => {
                console.say("Exiting the system. Goodbye!")?;
                break;
            }
            _ => console.say("Invalid option. Please try again.")?,
        }
    }

    Ok(())
}

// ============================================================================
// TRAFFIC DESK
// ============================================================================

pub fn run_traffic<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let mut system = TrafficSystem::new();
    console.say("Welcome to the Traffic Fine Management System!")?;

    loop {
        let Some(choice) = console.menu(&[
            "Add Driver",
            "Add Traffic Violation",
            "Reset Violations for Driver",
            "Display Driver Details",
            "Exit",
        ])?
        else {
            break;
        };

        match choice {
            1 => {
                let Some(name) = console.line("Enter Driver Name: ")? else { break };
                let Some(license) =
                    console.line("Enter License Number (8-12 alphanumeric characters): ")?
                else {
                    break;
                };
                outcome(
                    console,
                    system.add_driver(&name, &license),
                    "Driver added successfully!",
                )?;
            }
            2 => {
                let Some(license) = console.line("Enter Driver's License Number: ")? else {
                    break;
                };
                if let Err(e) = system.driver(&license) {
                    console.say(&format!("Error: {}", e))?;
                    continue;
                }
                let Some(type_name) = console
                    .line("Enter Violation Type (Speeding, Parking, Signal Violation): ")?
                else {
                    break;
                };
                let Some(fine) = console.number::<f64>("Enter Fine Amount: ")? else { break };
                let result = Violation::new(&type_name, fine)
                    .and_then(|violation| system.record_violation(&license, violation));
                outcome(console, result, "Violation added successfully!")?;
            }
            3 => {
                let Some(license) = console.line("Enter Driver's License Number: ")? else {
                    break;
                };
                outcome(
                    console,
                    system.reset_violations(&license),
                    "Driver's violations have been reset.",
                )?;
            }
            4 => {
                let Some(license) = console.line("Enter Driver's License Number: ")? else {
                    break;
                };
                match system.driver(&license) {
                    Ok(driver) => {
                        let details = driver.to_string();
                        console.say(&details)?;
                    }
                    Err(e) => console.say(&format!("Error: {}", e))?,
                }
            }
            5 => {
                console.say("Exiting the system. Goodbye!")?;
                break;
            }
            _ => console.say("Invalid option. Please try again.")?,
        }
    }

    Ok(())
}

// ============================================================================
// DESK PICKER
// ============================================================================

/// Top-level menu used when no desk is named on the command line.
pub fn run_picker<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.say("Management Systems - choose a desk")?;

    loop {
        let Some(choice) = console.menu(&[
            "Online Betting Management System",
            "Online Shopping System",
            "Traffic Fine Management System",
            "Exit",
        ])?
        else {
            break;
        };

        match choice {
            1 => run_betting(console)?,
            2 => run_shopping(console)?,
            3 => run_traffic(console)?,
            4 => {
                console.say("Goodbye!")?;
                break;
            }
            _ => console.say("Invalid option. Please try again.")?,
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    fn run_desk(
        run: impl FnOnce(&mut TestConsole) -> Result<()>,
        input: &str,
    ) -> String {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run(&mut console).unwrap();
        String::from_utf8(console.into_inner().1).unwrap()
    }

    #[test]
    fn test_betting_end_to_end() {
        let input = "1\nG1\nChampions League\n\
                     3\nalice\npassword1\n100\n\
                     4\nalice\nG1\n40\n\
                     5\nalice\n\
                     6\n";
        let output = run_desk(run_betting, input);

        assert!(output.contains("Game added successfully!"));
        assert!(output.contains("User registered successfully!"));
        assert!(output.contains("Bet placed successfully!"));
        assert!(output.contains("Bet History:"));
        assert!(output.contains("Game ID: G1, Bet Amount: $40.0"));
        assert!(output.contains("Exiting the system. Goodbye!"));
    }

    #[test]
    fn test_betting_insufficient_balance_reported() {
        let input = "1\nG1\nCup\n\
                     3\nalice\npassword1\n10\n\
                     4\nalice\nG1\n50\n\
                     5\nalice\n\
                     6\n";
        let output = run_desk(run_betting, input);

        assert!(output.contains("Error: Insufficient balance."));
        // The failed bet left no history entry
        let after_history = output.split("Bet History:").nth(1).unwrap();
        assert!(!after_history.contains("Game ID:"));
    }

    #[test]
    fn test_betting_weak_password_reported() {
        let input = "3\nalice\nshort\n100\n6\n";
        let output = run_desk(run_betting, input);
        assert!(output
            .contains("Error: Password must be at least 8 characters long and contain a number."));
    }

    #[test]
    fn test_shopping_end_to_end() {
        let input = "1\n1\nAlice\nalice@example.com\nsecret99!\n1 Main St\n\
                     2\n1\n10\nLaptop\n999.99\n24\n\
                     4\n1\n\
                     5\n1\n\
                     6\n";
        let output = run_desk(run_shopping, input);

        assert!(output.contains("Customer registered successfully!"));
        assert!(output.contains("Product added to cart!"));
        assert!(output.contains(
            "Electronics [ID: 10, Name: Laptop, Price: $999.99, Warranty: 24 months]"
        ));
        assert!(output.contains("Payment of $999.99 processed successfully!"));
        assert!(output.contains("Payment completed!"));
    }

    #[test]
    fn test_shopping_unknown_customer_short_circuits() {
        // Option 2 with an unknown customer must not prompt for product fields
        let input = "2\n9\n6\n";
        let output = run_desk(run_shopping, input);

        assert!(output.contains("Error: Customer not found."));
        assert!(!output.contains("Enter Product ID: "));
    }

    #[test]
    fn test_shopping_remove_missing_product() {
        let input = "1\n1\nAlice\nalice@example.com\nsecret99!\n1 Main St\n\
                     3\n1\n42\n\
                     6\n";
        let output = run_desk(run_shopping, input);
        assert!(output.contains("Error: Product not found in the cart."));
    }

    #[test]
    fn test_traffic_end_to_end_reset_scenario() {
        let input = "1\nAlice\nABC12345\n\
                     2\nABC12345\nSpeeding\n50\n\
                     4\nABC12345\n\
                     3\nABC12345\n\
                     4\nABC12345\n\
                     5\n";
        let output = run_desk(run_traffic, input);

        assert!(output.contains("Driver added successfully!"));
        assert!(output.contains("Violation added successfully!"));
        assert!(output.contains("Driver's violations have been reset."));

        // Before the reset: $50.0 and count 1; after: $0.0 and count 0
        assert!(output.contains("Total Fines: $50.0"));
        assert!(output.contains("Violation Count: 1"));
        assert!(output.contains("Total Fines: $0.0"));
        assert!(output.contains("Violation Count: 0"));
        assert!(
            output.find("Total Fines: $50.0").unwrap()
                < output.find("Total Fines: $0.0").unwrap()
        );
    }

    #[test]
    fn test_traffic_invalid_violation_type() {
        let input = "1\nAlice\nABC12345\n\
                     2\nABC12345\nJaywalking\n50\n\
                     4\nABC12345\n\
                     5\n";
        let output = run_desk(run_traffic, input);

        assert!(output.contains("Error: Invalid violation type."));
        // The rejected violation never reached the driver record
        assert!(output.contains("Total Fines: $0.0"));
        assert!(output.contains("Violation Count: 0"));
    }

    #[test]
    fn test_traffic_bad_license_reported() {
        let input = "1\nAlice\nBAD-1\n5\n";
        let output = run_desk(run_traffic, input);
        assert!(output
            .contains("Error: License number must be alphanumeric and 8-12 characters long."));
    }

    #[test]
    fn test_menu_reprompts_on_non_numeric_choice() {
        let input = "abc\n6\n";
        let output = run_desk(run_betting, input);

        assert!(output.contains("Invalid number. Please try again."));
        assert!(output.contains("Exiting the system. Goodbye!"));
    }

    #[test]
    fn test_menu_rejects_out_of_range_choice() {
        let input = "9\n5\n";
        let output = run_desk(run_traffic, input);
        assert!(output.contains("Invalid option. Please try again."));
    }

    #[test]
    fn test_eof_mid_prompt_winds_down() {
        // EOF while waiting for the game name: no panic, loop just ends
        let input = "1\nG1\n";
        let output = run_desk(run_betting, input);
        assert!(output.contains("Enter Game Name: "));
    }

    #[test]
    fn test_picker_dispatches_and_returns() {
        let input = "3\n\
                     1\nAlice\nABC12345\n\
                     5\n\
                     4\n";
        let output = run_desk(run_picker, input);

        assert!(output.contains("Welcome to the Traffic Fine Management System!"));
        assert!(output.contains("Driver added successfully!"));
        assert!(output.contains("Goodbye!"));
    }
}
