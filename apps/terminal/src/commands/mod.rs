//! # Terminal Commands
//!
//! Every operator command, parsed from one input line.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (parsing, dispatch)
//! ├── product.rs   ◄─── products, categories, add-product, edit-product
//! ├── cart.rs      ◄─── add, qty, remove, cart, clear, discount, pay, checkout
//! ├── discount.rs  ◄─── codes, add-code, set-code, toggle-code, delete-code
//! ├── sale.rs      ◄─── sales, sale, report
//! └── config.rs    ◄─── config
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  brew> add-product "Oat Latte" Coffee 5.25 40                          │
//! │         │                                                               │
//! │         │ split_args (quotes group words)                               │
//! │         ▼                                                               │
//! │  ["add-product", "Oat Latte", "Coffee", "5.25", "40"]                   │
//! │         │                                                               │
//! │         │ clap (CommandLine::try_parse_from)                            │
//! │         ▼                                                               │
//! │  Command::AddProduct { name, category, price, stock, image }           │
//! │         │                                                               │
//! │         │ handler → PosState method                                     │
//! │         ▼                                                               │
//! │  Ok(String) printed to stdout     Err(ApiError) printed as "✗ ..."     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod config;
pub mod discount;
pub mod product;
pub mod sale;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use brew_core::CoreError;

use crate::error::{ApiError, ApiResult};
use crate::state::PosState;

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and prompt again.
    Continue(String),
    Quit,
}

#[derive(Debug, Parser)]
#[command(
    name = "brew",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Brew POS operator commands"
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List products, optionally only one category
    Products { category: Option<String> },

    /// List product categories
    Categories,

    /// Add a product to the catalog
    #[command(name = "add-product")]
    AddProduct {
        name: String,
        category: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
        #[arg(allow_hyphen_values = true)]
        stock: String,
        image: Option<String>,
    },

    /// Change one field of a product
    #[command(name = "edit-product")]
    EditProduct {
        id: String,
        field: product::ProductField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Add a product to the cart
    Add {
        product_id: String,
        #[arg(default_value_t = 1)]
        quantity: i64,
    },

    /// Change a cart line by a signed amount
    Qty {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Remove a line from the cart
    Remove { product_id: String },

    /// Show the cart
    Cart,

    /// Empty the cart
    Clear,

    /// Apply a discount code to the cart
    Discount { code: String },

    /// Remove the applied discount
    Undiscount,

    /// Open the payment step
    Pay,

    /// Leave the payment step
    Cancel,

    /// Complete the order
    Checkout { method: String },

    /// List discount codes
    Codes,

    /// Register a discount code
    #[command(name = "add-code")]
    AddCode {
        code: String,
        kind: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        description: Option<String>,
    },

    /// Change one field of a discount code
    #[command(name = "set-code")]
    SetCode {
        code: String,
        field: discount::CodeField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Enable or disable a discount code
    #[command(name = "toggle-code")]
    ToggleCode { code: String },

    /// Delete a discount code
    #[command(name = "delete-code")]
    DeleteCode { code: String },

    /// Show recent sales
    Sales {
        #[arg(default_value_t = 10)]
        count: usize,
    },

    /// Show one sale itemized, by id or the short id from `sales`
    Sale { id: String },

    /// Show the sales dashboard
    Report,

    /// Show the active configuration
    Config,

    /// Leave the terminal
    #[command(alias = "exit")]
    Quit,
}

/// Parses and runs one input line.
///
/// Blank lines produce empty output. `help` output is returned as normal
/// output, not as an error.
pub async fn execute(state: &mut PosState, line: &str) -> ApiResult<Outcome> {
    let args = split_args(line)?;
    if args.is_empty() {
        return Ok(Outcome::Continue(String::new()));
    }

    let parsed = match CommandLine::try_parse_from(&args) {
        Ok(parsed) => parsed,
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            return Ok(Outcome::Continue(e.render().to_string()));
        }
        Err(e) => return Err(ApiError::usage(e.render().to_string().trim_end())),
    };

    let output = match parsed.command {
        Command::Products { category } => product::list(state, category.as_deref()),
        Command::Categories => product::categories(state),
        Command::AddProduct {
            name,
            category,
            price,
            stock,
            image,
        } => product::add(state, name, category, price, stock, image).await?,
        Command::EditProduct { id, field, value } => {
            product::edit(state, &id, field, &value).await?
        }

        Command::Add {
            product_id,
            quantity,
        } => cart::add(state, &product_id, quantity)?,
        Command::Qty { product_id, delta } => cart::change_quantity(state, &product_id, delta)?,
        Command::Remove { product_id } => cart::remove(state, &product_id)?,
        Command::Cart => cart::show(state),
        Command::Clear => cart::clear(state)?,
        Command::Discount { code } => cart::apply_discount(state, &code)?,
        Command::Undiscount => cart::remove_discount(state)?,
        Command::Pay => cart::pay(state)?,
        Command::Cancel => cart::cancel(state)?,
        Command::Checkout { method } => cart::checkout(state, &method).await?,

        Command::Codes => discount::list(state),
        Command::AddCode {
            code,
            kind,
            value,
            description,
        } => discount::add(state, code, &kind, value, description).await?,
        Command::SetCode { code, field, value } => {
            discount::set(state, &code, field, &value).await?
        }
        Command::ToggleCode { code } => discount::toggle(state, &code).await?,
        Command::DeleteCode { code } => discount::delete(state, &code).await?,

        Command::Sales { count } => sale::recent(state, count),
        Command::Sale { id } => sale::detail(state, &id)?,
        Command::Report => sale::report(state),
        Command::Config => config::show(state)?,
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Continue(output))
}

/// Splits a line into words. Single or double quotes group words
/// containing spaces.
pub fn split_args(line: &str) -> ApiResult<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ApiError::usage("Unterminated quote"));
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

/// Converts a parse failure on operator input into an API error.
fn invalid<E: Into<CoreError>>(err: E) -> ApiError {
    ApiError::from(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use brew_store::Storage;

    async fn state() -> PosState {
        PosState::initialize(Storage::memory(), ConfigState::default())
            .await
            .unwrap()
    }

    #[test]
    fn test_split_args() {
        assert_eq!(
            split_args(r#"add-product "Oat Latte" Coffee 5.25 40"#).unwrap(),
            vec!["add-product", "Oat Latte", "Coffee", "5.25", "40"]
        );
        assert_eq!(
            split_args("add-code SPRING fixed 2 'Spring treat'").unwrap(),
            vec!["add-code", "SPRING", "fixed", "2", "Spring treat"]
        );
        assert_eq!(split_args(r#"x """#).unwrap(), vec!["x", ""]);
        assert!(split_args("   ").unwrap().is_empty());
        assert!(split_args(r#"add-product "Oat"#).is_err());
    }

    #[tokio::test]
    async fn test_unknown_command_is_usage_error() {
        let mut state = state().await;
        let err = execute(&mut state, "brew-coffee").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Usage);

        let err = execute(&mut state, "qty 1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Usage);
    }

    #[tokio::test]
    async fn test_help_and_quit() {
        let mut state = state().await;
        match execute(&mut state, "help").await.unwrap() {
            Outcome::Continue(text) => assert!(text.contains("checkout")),
            Outcome::Quit => panic!("help should not quit"),
        }
        assert_eq!(execute(&mut state, "quit").await.unwrap(), Outcome::Quit);
        assert_eq!(execute(&mut state, "exit").await.unwrap(), Outcome::Quit);
        assert_eq!(
            execute(&mut state, "").await.unwrap(),
            Outcome::Continue(String::new())
        );
    }

    #[tokio::test]
    async fn test_negative_quantity_delta() {
        let mut state = state().await;
        execute(&mut state, "add 1 3").await.unwrap();
        execute(&mut state, "qty 1 -2").await.unwrap();
        assert_eq!(state.cart().quantity_of("1"), 1);
    }
}
