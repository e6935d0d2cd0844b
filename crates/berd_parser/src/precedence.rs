//! Binding powers, lowest to highest.

/// How tightly an operator binds. An infix handler keeps extending the
/// current expression only while its binding power is strictly greater than
/// the threshold the expression was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BindingPower {
    DefaultBp = 0,
    Comma,
    Assignment,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    /// `**`
    BitwiseXor,
    BitwiseAnd,
    /// `==`, `;=`, `===`, `;==`, `====`, `;===`
    Equality,
    /// `<`, `>`, `<=`, `>=`
    Relational,
    /// `<<`, `>>`, `<<<`, `>>>`
    BitwiseShift,
    Additive,
    Multiplicative,
    /// `^`
    Exponentiation,
    Prefix,
    Postfix,
    New,
    /// `x.y`, `x[y]`, `x(y)`
    AccessCallNew,
    Grouping,
    Primary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert!(BindingPower::DefaultBp < BindingPower::Comma);
        assert!(BindingPower::Assignment < BindingPower::LogicalOr);
        assert!(BindingPower::BitwiseXor < BindingPower::BitwiseAnd);
        assert!(BindingPower::Equality < BindingPower::Relational);
        assert!(BindingPower::Additive < BindingPower::Multiplicative);
        assert!(BindingPower::Exponentiation < BindingPower::Prefix);
        assert!(BindingPower::AccessCallNew < BindingPower::Grouping);
        assert_eq!(BindingPower::Primary as u8, 19);
    }
}
