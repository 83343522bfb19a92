use crate::encoding::literal::Var;
use crate::model::attribute::{AttributeValue, Colour, Fill, Number, Shape};
use core::ops::RangeInclusive;

/// Variable numbering for one solve over `num_cards` cards.
///
/// Card `i` (1-based) is selected iff variable `i` is true. The twelve
/// attribute values follow as one contiguous block starting at
/// `num_cards + 1`: shape `c r w`, fill `l g d`, colour `g r v`, number `1 2 3`.
/// An attribute variable being true means the chosen triple shows that value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableMap {
    num_cards: usize,
    shape: [Var; 3],
    fill: [Var; 3],
    colour: [Var; 3],
    number: [Var; 3],
}

impl VariableMap {
    pub fn new(num_cards: usize) -> Self {
        let base = num_cards as u32;
        let block = |attribute: u32| {
            [0, 1, 2].map(|value| Var::new(base + attribute * 3 + value + 1))
        };
        Self {
            num_cards,
            shape: block(0),
            fill: block(1),
            colour: block(2),
            number: block(3),
        }
    }

    pub fn num_cards(&self) -> usize {
        self.num_cards
    }

    /// Selection plus attribute variables; auxiliaries are numbered above this.
    pub fn num_vars(&self) -> usize {
        self.num_cards + AttributeValue::COUNT
    }

    /// Selection variable of the 1-based card `index`.
    pub fn selection(&self, index: usize) -> Option<Var> {
        (1..=self.num_cards)
            .contains(&index)
            .then(|| Var::new(index as u32))
    }

    pub fn selection_vars(&self) -> Vec<Var> {
        (1..=self.num_cards).map(|index| Var::new(index as u32)).collect()
    }

    pub fn attribute(&self, value: AttributeValue) -> Var {
        match value {
            AttributeValue::Shape(shape) => self.shape(shape),
            AttributeValue::Fill(fill) => self.fill(fill),
            AttributeValue::Colour(colour) => self.colour(colour),
            AttributeValue::Number(number) => self.number(number),
        }
    }

    pub fn shape(&self, shape: Shape) -> Var {
        self.shape[shape.index()]
    }

    pub fn fill(&self, fill: Fill) -> Var {
        self.fill[fill.index()]
    }

    pub fn colour(&self, colour: Colour) -> Var {
        self.colour[colour.index()]
    }

    pub fn number(&self, number: Number) -> Var {
        self.number[number.index()]
    }

    /// The three variables of each attribute, in attribute order.
    pub fn attribute_groups(&self) -> [[Var; 3]; 4] {
        [self.shape, self.fill, self.colour, self.number]
    }

    pub fn attribute_range(&self) -> RangeInclusive<u32> {
        self.shape[0].id()..=self.number[2].id()
    }
}
