use crate::model::attribute::AttributeValue;
use crate::model::card::CardDescriptor;

/// For each attribute value, the 1-based indices of cards showing it.
///
/// Indexed by [`AttributeValue::offset`]; lists are ascending because they
/// are filled in a single pass over the cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WitnessIndex {
    witnesses: [Vec<usize>; AttributeValue::COUNT],
}

impl WitnessIndex {
    pub fn build(cards: &[CardDescriptor]) -> Self {
        let mut index = Self::default();
        for (position, card) in cards.iter().enumerate() {
            for value in card.values() {
                index.witnesses[value.offset()].push(position + 1);
            }
        }
        index
    }

    pub fn witnesses(&self, value: AttributeValue) -> &[usize] {
        &self.witnesses[value.offset()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeValue, &[usize])> {
        AttributeValue::ALL
            .into_iter()
            .map(|value| (value, self.witnesses(value)))
    }
}
