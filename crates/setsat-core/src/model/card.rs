use crate::model::attribute::{Attribute, AttributeValue, Colour, Fill, Number, Shape};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A detected card, serialized as four symbols: shape, fill, colour, number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardDescriptor {
    pub shape: Shape,
    pub fill: Fill,
    pub colour: Colour,
    pub number: Number,
}

impl CardDescriptor {
    pub const fn new(shape: Shape, fill: Fill, colour: Colour, number: Number) -> Self {
        Self {
            shape,
            fill,
            colour,
            number,
        }
    }

    /// The card's four attribute values in attribute order.
    pub const fn values(self) -> [AttributeValue; 4] {
        [
            AttributeValue::Shape(self.shape),
            AttributeValue::Fill(self.fill),
            AttributeValue::Colour(self.colour),
            AttributeValue::Number(self.number),
        ]
    }

    pub const fn value(self, attribute: Attribute) -> AttributeValue {
        self.values()[attribute.index()]
    }
}

/// Whether three cards form a Set: every attribute all equal or all distinct.
pub fn is_set(a: CardDescriptor, b: CardDescriptor, c: CardDescriptor) -> bool {
    let (a, b, c) = (a.values(), b.values(), c.values());
    (0..4).all(|i| {
        let all_same = a[i] == b[i] && b[i] == c[i];
        let all_distinct = a[i] != b[i] && b[i] != c[i] && a[i] != c[i];
        all_same || all_distinct
    })
}

impl fmt::Display for CardDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.shape, self.fill, self.colour, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("expected 4 symbols but found {found}")]
    WrongLength { found: usize },
    #[error("unknown {attribute} symbol '{symbol}' (expected one of {expected:?})")]
    UnknownSymbol {
        attribute: Attribute,
        symbol: char,
        expected: [char; 3],
    },
}

impl FromStr for CardDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Detector class names may carry padding between symbols.
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let [shape, fill, colour, number] = symbols[..] else {
            return Err(DescriptorError::WrongLength {
                found: symbols.len(),
            });
        };

        let unknown = |attribute: Attribute, symbol: char| DescriptorError::UnknownSymbol {
            attribute,
            symbol,
            expected: attribute.symbols(),
        };

        Ok(CardDescriptor {
            shape: Shape::from_symbol(shape).ok_or_else(|| unknown(Attribute::Shape, shape))?,
            fill: Fill::from_symbol(fill).ok_or_else(|| unknown(Attribute::Fill, fill))?,
            colour: Colour::from_symbol(colour)
                .ok_or_else(|| unknown(Attribute::Colour, colour))?,
            number: Number::from_symbol(number)
                .ok_or_else(|| unknown(Attribute::Number, number))?,
        })
    }
}

impl TryFrom<String> for CardDescriptor {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardDescriptor> for String {
    fn from(card: CardDescriptor) -> Self {
        card.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{CardDescriptor, DescriptorError, is_set};
    use crate::model::attribute::{Attribute, Colour, Fill, Number, Shape};

    fn card(text: &str) -> CardDescriptor {
        text.parse().unwrap()
    }

    #[test]
    fn parses_four_symbol_descriptor() {
        let parsed = card("rdv3");
        assert_eq!(
            parsed,
            CardDescriptor::new(Shape::Rhombus, Fill::Solid, Colour::Violet, Number::Three)
        );
        assert_eq!(parsed.to_string(), "rdv3");
    }

    #[test]
    fn red_is_not_a_fill() {
        let err = "crg1".parse::<CardDescriptor>().unwrap_err();
        assert_eq!(
            err,
            DescriptorError::UnknownSymbol {
                attribute: Attribute::Fill,
                symbol: 'r',
                expected: ['l', 'g', 'd'],
            }
        );
    }

    #[test]
    fn whitespace_inside_descriptor_is_ignored() {
        assert_eq!(card(" c l g 1 "), card("clg1"));
    }

    #[test]
    fn rejects_unknown_shape_symbol() {
        let err = "xlg1".parse::<CardDescriptor>().unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::UnknownSymbol {
                attribute: Attribute::Shape,
                symbol: 'x',
                ..
            }
        ));
    }

    #[test]
    fn rejects_symbol_valid_only_in_another_position() {
        // 'v' is a colour, never a fill.
        let err = "cvg1".parse::<CardDescriptor>().unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::UnknownSymbol {
                attribute: Attribute::Fill,
                ..
            }
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            "clg".parse::<CardDescriptor>().unwrap_err(),
            DescriptorError::WrongLength { found: 3 }
        );
        assert_eq!(
            "clg12".parse::<CardDescriptor>().unwrap_err(),
            DescriptorError::WrongLength { found: 5 }
        );
    }

    #[test]
    fn is_set_accepts_all_same_and_all_distinct() {
        assert!(is_set(card("clg1"), card("clg1"), card("clg1")));
        assert!(is_set(card("clg1"), card("rgr2"), card("wdv3")));
        assert!(is_set(card("clg1"), card("clr2"), card("clv3")));
    }

    #[test]
    fn is_set_rejects_two_and_one() {
        assert!(!is_set(card("clg1"), card("clg1"), card("clg2")));
        assert!(!is_set(card("clg1"), card("rlg1"), card("rlg1")));
    }

    #[test]
    fn serde_uses_symbol_string() {
        let json = serde_json::to_string(&card("wgr2")).unwrap();
        assert_eq!(json, "\"wgr2\"");
        let back: CardDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card("wgr2"));
        assert!(serde_json::from_str::<CardDescriptor>("\"wgq2\"").is_err());
    }
}
