//! REST-style order tokens.
//!
//! An order token is `column` or `column:direction`, a URL-safe spelling of an
//! `ORDER BY` item:
//!
//! ```text
//! name          -> name
//! name:asc      -> name ASC
//! pets.name:asc -> pets.name ASC
//! ```
//!
//! Neither the column nor the direction is validated; the database decides
//! what it accepts.

/// Separator between the column and the direction of an order token.
pub const ORDER_SEPARATOR: char = ':';

/// Convert one order token into an `ORDER BY` item.
///
/// Only the first separator splits the token; everything after it is the
/// direction (`"a:b:c"` becomes `"a B:C"`).
pub fn parse_order(token: &str) -> String {
    match token.split_once(ORDER_SEPARATOR) {
        Some((column, direction)) => {
            let mut out = String::with_capacity(token.len());
            out.push_str(column);
            out.push(' ');
            out.push_str(&direction.to_uppercase());
            out
        }
        None => token.to_string(),
    }
}

/// Convert a list of order tokens, keeping length and order.
///
/// The result can be handed straight to [`Builder::with_orders`](crate::Builder::with_orders).
pub fn parse_orders<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|t| parse_order(t.as_ref())).collect()
}
