//! Payment card data carried by card-method transactions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of leading characters hidden by [`Card::masked`].
const MASKED_PREFIX_LEN: usize = 10;

/// Payment card details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Card {
    /// Card number (PAN). Masked before it is ever persisted.
    #[schema(example = "1234567812345678")]
    pub number: String,
    /// Name printed on the card
    #[schema(example = "John Doe")]
    pub holder_name: String,
    /// Expiration in `MM/YY` form
    #[schema(example = "12/25")]
    pub expiration: String,
    #[schema(example = "123")]
    pub cvv: String,
}

impl Card {
    /// Returns a copy of the card with its number masked.
    pub fn masked(&self) -> Self {
        Self {
            number: mask_card_number(&self.number),
            ..self.clone()
        }
    }
}

/// Hides the first ten characters of a card number behind `*`.
///
/// The length is preserved; a number of ten characters or fewer
/// comes back entirely masked.
pub fn mask_card_number(number: &str) -> String {
    let len = number.chars().count();
    let kept: String = number.chars().skip(MASKED_PREFIX_LEN).collect();
    let hidden = len - kept.chars().count();

    let mut masked = "*".repeat(hidden);
    masked.push_str(&kept);
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_sixteen_digit_number() {
        assert_eq!(mask_card_number("1234567812345678"), "**********345678");
    }

    #[test]
    fn test_mask_preserves_length_and_suffix() {
        for number in ["123456789012", "1234567890123456789", "4111111111111111"] {
            let masked = mask_card_number(number);
            assert_eq!(masked.len(), number.len());
            assert!(masked.starts_with("**********"));
            assert_eq!(&masked[10..], &number[10..]);
        }
    }

    #[test]
    fn test_mask_short_number_is_fully_hidden() {
        assert_eq!(mask_card_number("12345"), "*****");
        assert_eq!(mask_card_number(""), "");
    }

    #[test]
    fn test_masked_card_keeps_other_fields() {
        let card = Card {
            number: "8765432187654321".into(),
            holder_name: "Jane Doe".into(),
            expiration: "11/24".into(),
            cvv: "456".into(),
        };

        let masked = card.masked();

        assert_eq!(masked.number, "**********654321");
        assert_eq!(masked.holder_name, card.holder_name);
        assert_eq!(masked.expiration, card.expiration);
        assert_eq!(masked.cvv, card.cvv);
    }
}
