use core::fmt;

macro_rules! attribute_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $index:literal => $symbol:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $index),+
        }

        impl $name {
            pub const ALL: [$name; 3] = [$($name::$variant),+];

            pub const fn index(self) -> usize {
                self as usize
            }

            pub const fn from_symbol(symbol: char) -> Option<Self> {
                match symbol {
                    $($symbol => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub const fn symbol(self) -> char {
                match self {
                    $($name::$variant => $symbol),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.symbol())
            }
        }
    };
}

attribute_enum!(
    /// Outline of the symbols printed on a card.
    Shape {
        Circle = 0 => 'c',
        Rhombus = 1 => 'r',
        Wave = 2 => 'w',
    }
);

attribute_enum!(
    /// Shading of the symbols: empty outline, striped gradient or solid.
    Fill {
        Empty = 0 => 'l',
        Striped = 1 => 'g',
        Solid = 2 => 'd',
    }
);

attribute_enum!(
    Colour {
        Green = 0 => 'g',
        Red = 1 => 'r',
        Violet = 2 => 'v',
    }
);

attribute_enum!(
    /// How many symbols the card shows.
    Number {
        One = 0 => '1',
        Two = 1 => '2',
        Three = 2 => '3',
    }
);

/// The four positions of a descriptor, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Attribute {
    Shape = 0,
    Fill = 1,
    Colour = 2,
    Number = 3,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Shape,
        Attribute::Fill,
        Attribute::Colour,
        Attribute::Number,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Attribute::Shape => "shape",
            Attribute::Fill => "fill",
            Attribute::Colour => "colour",
            Attribute::Number => "number",
        }
    }

    /// Symbols accepted at this position, in variable order.
    pub const fn symbols(self) -> [char; 3] {
        match self {
            Attribute::Shape => ['c', 'r', 'w'],
            Attribute::Fill => ['l', 'g', 'd'],
            Attribute::Colour => ['g', 'r', 'v'],
            Attribute::Number => ['1', '2', '3'],
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the twelve attribute values a card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeValue {
    Shape(Shape),
    Fill(Fill),
    Colour(Colour),
    Number(Number),
}

impl AttributeValue {
    pub const COUNT: usize = 12;

    pub const ALL: [AttributeValue; 12] = [
        AttributeValue::Shape(Shape::Circle),
        AttributeValue::Shape(Shape::Rhombus),
        AttributeValue::Shape(Shape::Wave),
        AttributeValue::Fill(Fill::Empty),
        AttributeValue::Fill(Fill::Striped),
        AttributeValue::Fill(Fill::Solid),
        AttributeValue::Colour(Colour::Green),
        AttributeValue::Colour(Colour::Red),
        AttributeValue::Colour(Colour::Violet),
        AttributeValue::Number(Number::One),
        AttributeValue::Number(Number::Two),
        AttributeValue::Number(Number::Three),
    ];

    pub const fn attribute(self) -> Attribute {
        match self {
            AttributeValue::Shape(_) => Attribute::Shape,
            AttributeValue::Fill(_) => Attribute::Fill,
            AttributeValue::Colour(_) => Attribute::Colour,
            AttributeValue::Number(_) => Attribute::Number,
        }
    }

    /// Zero-based position among the twelve values: shape first, number last.
    pub const fn offset(self) -> usize {
        let within = match self {
            AttributeValue::Shape(value) => value.index(),
            AttributeValue::Fill(value) => value.index(),
            AttributeValue::Colour(value) => value.index(),
            AttributeValue::Number(value) => value.index(),
        };
        self.attribute().index() * 3 + within
    }

    pub const fn symbol(self) -> char {
        match self {
            AttributeValue::Shape(value) => value.symbol(),
            AttributeValue::Fill(value) => value.symbol(),
            AttributeValue::Colour(value) => value.symbol(),
            AttributeValue::Number(value) => value.symbol(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute(), self.symbol())
    }
}
