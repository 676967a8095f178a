// 🎲 Betting Desk - accounts, game catalog, bet placement
//
// Users carry a balance and an append-only bet history. The admin account
// owns the game catalog. Placing a bet composes balance deduction with the
// history append as one logical unit: a failed deduction records nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::{Repository, RepositoryError};
use crate::validation::{self, PasswordPolicy, ValidationError};

// ============================================================================
// BETTING ERROR
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BettingError {
    #[error("Insufficient balance.")]
    InsufficientBalance,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ============================================================================
// USER ACCOUNT
// ============================================================================

/// A betting account: username, credential, and a running balance.
///
/// The password must satisfy [`PasswordPolicy::Basic`]; the opening balance
/// may be zero but never negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    password: String,
    balance: f64,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(username: &str, password: &str, balance: f64) -> Result<Self, BettingError> {
        PasswordPolicy::Basic.check(password)?;
        validation::non_negative_amount("Initial balance", balance)?;

        Ok(UserAccount {
            username: username.to_string(),
            password: password.to_string(),
            balance,
            created_at: Utc::now(),
        })
    }

    /// Plain credential comparison; there is no session state.
    pub fn login(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn deposit(&mut self, amount: f64) -> Result<(), BettingError> {
        validation::positive_amount("Deposit amount", amount)?;
        self.balance += amount;
        Ok(())
    }

    /// Deducts the full amount or nothing.
    pub fn deduct_balance(&mut self, amount: f64) -> Result<(), BettingError> {
        if amount > self.balance {
            return Err(BettingError::InsufficientBalance);
        }
        self.balance -= amount;
        Ok(())
    }
}

// ============================================================================
// GAME
// ============================================================================

/// Catalog entry the admin manages. Keyed by its ID in the game repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
}

impl Game {
    pub fn new(id: &str, name: &str) -> Self {
        Game {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

// ============================================================================
// BET
// ============================================================================

/// One wager on a game. The amount is validated at construction; the record
/// itself is immutable once appended to a player's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: String,
    pub game_id: String,
    pub amount: f64,
    pub placed_at: DateTime<Utc>,
}

impl Bet {
    pub fn new(game_id: &str, amount: f64) -> Result<Self, BettingError> {
        validation::positive_amount("Bet amount", amount)?;

        Ok(Bet {
            id: uuid::Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            amount,
            placed_at: Utc::now(),
        })
    }
}

// ============================================================================
// PLAYER
// ============================================================================

/// A registered user plus their append-only bet history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub account: UserAccount,
    bets: Vec<Bet>,
}

impl Player {
    pub fn new(account: UserAccount) -> Self {
        Player {
            account,
            bets: Vec::new(),
        }
    }

    /// Deduction first, history second. If the deduction fails the history
    /// is untouched.
    pub fn place_bet(&mut self, bet: Bet) -> Result<(), BettingError> {
        self.account.deduct_balance(bet.amount)?;
        self.bets.push(bet);
        Ok(())
    }

    pub fn bet_history(&self) -> &[Bet] {
        &self.bets
    }
}

// ============================================================================
// BETTING SYSTEM
// ============================================================================

/// Holds the player repository (keyed by username), the game catalog
/// (keyed by game ID), and the stock admin account.
#[derive(Debug, Clone)]
pub struct BettingSystem {
    players: Repository<String, Player>,
    games: Repository<String, Game>,
    admin: UserAccount,
}

impl BettingSystem {
    pub fn new() -> Self {
        BettingSystem {
            players: Repository::new("User"),
            games: Repository::new("Game ID"),
            // Stock admin credential; constructed directly since the
            // password field is module-private.
            admin: UserAccount {
                username: "admin".to_string(),
                password: "admin123".to_string(),
                balance: 0.0,
                created_at: Utc::now(),
            },
        }
    }

    pub fn admin(&self) -> &UserAccount {
        &self.admin
    }

    // ------------------------------------------------------------------
    // Admin operations
    // ------------------------------------------------------------------

    pub fn add_game(&mut self, game: Game) -> Result<(), BettingError> {
        self.games.insert(game.id.clone(), game)?;
        Ok(())
    }

    pub fn remove_game(&mut self, game_id: &str) -> Result<Game, BettingError> {
        Ok(self.games.remove(game_id)?)
    }

    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    // ------------------------------------------------------------------
    // User operations
    // ------------------------------------------------------------------

    pub fn register_user(
        &mut self,
        username: &str,
        password: &str,
        balance: f64,
    ) -> Result<(), BettingError> {
        let account = UserAccount::new(username, password, balance)?;
        self.players.insert(username.to_string(), Player::new(account))?;
        Ok(())
    }

    pub fn deposit(&mut self, username: &str, amount: f64) -> Result<(), BettingError> {
        self.players.get_mut(username)?.account.deposit(amount)
    }

    pub fn balance(&self, username: &str) -> Result<f64, BettingError> {
        Ok(self.players.get(username)?.account.balance())
    }

    /// Validates the user, the game, and the amount before any mutation.
    pub fn place_bet(
        &mut self,
        username: &str,
        game_id: &str,
        amount: f64,
    ) -> Result<(), BettingError> {
        self.players.get(username)?;
        self.games.get(game_id)?;

        let bet = Bet::new(game_id, amount)?;
        self.players.get_mut(username)?.place_bet(bet)
    }

    pub fn bet_history(&self, username: &str) -> Result<&[Bet], BettingError> {
        Ok(self.players.get(username)?.bet_history())
    }
}

impl Default for BettingSystem {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn system_with_game() -> BettingSystem {
        let mut system = BettingSystem::new();
        system.add_game(Game::new("G1", "Premier League Final")).unwrap();
        system.register_user("alice", "password1", 100.0).unwrap();
        system
    }

    #[test]
    fn test_account_password_policy() {
        // Too short
        assert_eq!(
            UserAccount::new("alice", "abc1", 0.0).unwrap_err(),
            BettingError::Validation(ValidationError::WeakPassword)
        );
        // No digit
        assert!(UserAccount::new("alice", "allletters", 0.0).is_err());
        // Valid, zero opening balance allowed
        assert!(UserAccount::new("alice", "password1", 0.0).is_ok());
        // Negative opening balance rejected
        assert!(UserAccount::new("alice", "password1", -1.0).is_err());
    }

    #[test]
    fn test_login_plain_comparison() {
        let account = UserAccount::new("alice", "password1", 0.0).unwrap();
        assert!(account.login("alice", "password1"));
        assert!(!account.login("alice", "wrong"));
        assert!(!account.login("bob", "password1"));
    }

    #[test]
    fn test_deposit() {
        let mut account = UserAccount::new("alice", "password1", 10.0).unwrap();

        account.deposit(40.0).unwrap();
        assert_eq!(account.balance(), 50.0);

        assert!(account.deposit(0.0).is_err());
        assert!(account.deposit(-5.0).is_err());
        assert_eq!(account.balance(), 50.0);
    }

    #[test]
    fn test_deduct_insufficient_balance_leaves_balance() {
        let mut account = UserAccount::new("alice", "password1", 30.0).unwrap();

        let err = account.deduct_balance(30.01).unwrap_err();
        assert_eq!(err, BettingError::InsufficientBalance);
        assert_eq!(account.balance(), 30.0);

        // Exact balance is allowed
        account.deduct_balance(30.0).unwrap();
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_bet_requires_positive_amount() {
        assert!(Bet::new("G1", 10.0).is_ok());
        assert!(Bet::new("G1", 0.0).is_err());
        assert!(Bet::new("G1", -1.0).is_err());
    }

    #[test]
    fn test_duplicate_game_rejected() {
        let mut system = BettingSystem::new();
        system.add_game(Game::new("G1", "Cup")).unwrap();

        let err = system.add_game(Game::new("G1", "Other")).unwrap_err();
        assert_eq!(err.to_string(), "Game ID already exists.");
        assert_eq!(system.games().count(), 1);
    }

    #[test]
    fn test_remove_missing_game_rejected() {
        let mut system = BettingSystem::new();
        assert!(system.remove_game("nope").is_err());

        system.add_game(Game::new("G1", "Cup")).unwrap();
        assert_eq!(system.remove_game("G1").unwrap().name, "Cup");
        assert!(system.remove_game("G1").is_err());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut system = BettingSystem::new();
        system.register_user("alice", "password1", 0.0).unwrap();

        let err = system.register_user("alice", "password2", 0.0).unwrap_err();
        assert_eq!(err.to_string(), "User already exists.");
    }

    #[test]
    fn test_place_bet_success() {
        let mut system = system_with_game();

        system.place_bet("alice", "G1", 40.0).unwrap();

        assert_eq!(system.balance("alice").unwrap(), 60.0);
        let history = system.bet_history("alice").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].game_id, "G1");
        assert_eq!(history[0].amount, 40.0);
    }

    #[test]
    fn test_place_bet_insufficient_balance_records_nothing() {
        let mut system = system_with_game();

        let err = system.place_bet("alice", "G1", 100.01).unwrap_err();
        assert_eq!(err, BettingError::InsufficientBalance);

        assert_eq!(system.balance("alice").unwrap(), 100.0);
        assert!(system.bet_history("alice").unwrap().is_empty());
    }

    #[test]
    fn test_place_bet_unknown_user_or_game() {
        let mut system = system_with_game();

        assert_eq!(
            system.place_bet("bob", "G1", 10.0).unwrap_err().to_string(),
            "User not found."
        );
        assert_eq!(
            system.place_bet("alice", "G9", 10.0).unwrap_err().to_string(),
            "Game ID not found."
        );
        // Neither failure touched the balance or history
        assert_eq!(system.balance("alice").unwrap(), 100.0);
        assert!(system.bet_history("alice").unwrap().is_empty());
    }

    #[test]
    fn test_history_preserves_order() {
        let mut system = system_with_game();
        system.add_game(Game::new("G2", "Derby")).unwrap();

        system.place_bet("alice", "G1", 10.0).unwrap();
        system.place_bet("alice", "G2", 20.0).unwrap();
        system.place_bet("alice", "G1", 5.0).unwrap();

        let ids: Vec<&str> = system
            .bet_history("alice")
            .unwrap()
            .iter()
            .map(|b| b.game_id.as_str())
            .collect();
        assert_eq!(ids, vec!["G1", "G2", "G1"]);
        assert_eq!(system.balance("alice").unwrap(), 65.0);
    }

    #[test]
    fn test_stock_admin_account() {
        let system = BettingSystem::new();
        assert!(system.admin().login("admin", "admin123"));
        assert_eq!(system.admin().balance(), 0.0);
    }
}
