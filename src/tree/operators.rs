//! Enumerated node attributes. Every member travels on the wire by name.

use crate::base::symbolic_enum;

symbolic_enum! {
    pub enum UnaryOperator {
        Negate => "NEGATE",
        Plus => "PLUS",
        Minus => "MINUS",
        Increment => "INCREMENT",
        Decrement => "DECREMENT",
    }
}

symbolic_enum! {
    pub enum BinaryOperator {
        Plus => "PLUS",
        Minus => "MINUS",
        Times => "TIMES",
        DividedBy => "DIVIDED_BY",
        EqualTo => "EQUAL_TO",
        NotEqualTo => "NOT_EQUAL_TO",
        GreaterThan => "GREATER_THAN",
        GreaterThanOrEqualTo => "GREATER_THAN_OR_EQUAL_TO",
        LessThan => "LESS_THAN",
        LessThanOrEqualTo => "LESS_THAN_OR_EQUAL_TO",
        ConditionalAnd => "CONDITIONAL_AND",
        ConditionalOr => "CONDITIONAL_OR",
    }
}

impl BinaryOperator {
    /// `&&` and `||`.
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::ConditionalAnd | Self::ConditionalOr)
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Self::EqualTo
                | Self::NotEqualTo
                | Self::GreaterThan
                | Self::GreaterThanOrEqualTo
                | Self::LessThan
                | Self::LessThanOrEqualTo
        )
    }
}

symbolic_enum! {
    pub enum AssignmentOperator {
        Equal => "EQUAL",
        PlusEqual => "PLUS_EQUAL",
    }
}

symbolic_enum! {
    pub enum LoopKind {
        For => "FOR",
        While => "WHILE",
        DoWhile => "DOWHILE",
    }
}

symbolic_enum! {
    pub enum ModifierKind {
        Public => "PUBLIC",
        Private => "PRIVATE",
        Override => "OVERRIDE",
    }
}

symbolic_enum! {
    pub enum JumpKind {
        Break => "BREAK",
        Continue => "CONTINUE",
    }
}
