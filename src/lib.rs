// Management Systems - Core Library
// Shared validation/repository core plus three menu-driven console desks

pub mod app;
pub mod betting;
pub mod console;
pub mod repository;
pub mod shopping;
pub mod traffic;
pub mod validation;

// Re-export commonly used types
pub use betting::{Bet, BettingError, BettingSystem, Game, Player, UserAccount};
pub use console::Console;
pub use repository::{Repository, RepositoryError};
pub use shopping::{
    Customer, PaymentProcessor, Product, ProductKind, ShoppingError, ShoppingSystem,
};
pub use traffic::{Driver, TrafficError, TrafficSystem, Violation, ViolationType};
pub use validation::{PasswordPolicy, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
