//! Pratt expression parser for operator precedence.

use crate::lexer::{Keyword, TokenKind};

/// Binding power of unary minus and bitwise NOT.
pub const UNARY_BP: u8 = 19;

/// Binding power of `NOT`.
pub const NOT_BP: u8 = 5;

/// Binding power of postfix `::type`, `[..]` and `COLLATE`.
pub const POSTFIX_BP: u8 = 21;

/// Returns the prefix binding power for a token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot => Some(UNARY_BP),
        TokenKind::Keyword(Keyword::Not) => Some(NOT_BP),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Comparisons and predicates; NOT here introduces NOT IN/LIKE/BETWEEN
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => Some((5, 6)),
        TokenKind::Keyword(
            Keyword::Is
            | Keyword::In
            | Keyword::Between
            | Keyword::Like
            | Keyword::ILike
            | Keyword::Not,
        ) => Some((5, 6)),

        // User-defined style operators (->, @>, ~*, ...)
        TokenKind::Operator(_) | TokenKind::BitOr => Some((7, 8)),

        TokenKind::BitAnd => Some((9, 10)),

        TokenKind::LeftShift | TokenKind::RightShift => Some((11, 12)),

        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((13, 14)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((15, 16)),

        TokenKind::Caret => Some((17, 18)),

        _ => None,
    }
}

/// Returns the postfix binding power for a token.
#[must_use]
pub const fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::DoubleColon | TokenKind::LeftBracket | TokenKind::Keyword(Keyword::Collate) => {
            Some(POSTFIX_BP)
        }
        _ => None,
    }
}

/// Returns the spelling of a binary operator as stored in the tree.
#[must_use]
pub fn binary_operator(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::Keyword(kw @ (Keyword::And | Keyword::Or | Keyword::Like | Keyword::ILike)) => {
            Some(kw.as_str().to_string())
        }
        TokenKind::Operator(op) => Some(op.clone()),
        TokenKind::NotEq => Some("<>".to_string()),
        other if infix_binding_power(other).is_some() => other.symbol().map(str::to_string),
        _ => None,
    }
}

/// Returns the spelling of a unary operator as stored in the tree.
#[must_use]
pub const fn unary_operator(kind: &TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Minus => Some("-"),
        TokenKind::Plus => Some("+"),
        TokenKind::Keyword(Keyword::Not) => Some("NOT"),
        TokenKind::BitNot => Some("~"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        let add_bp = infix_binding_power(&TokenKind::Plus).unwrap();
        let mul_bp = infix_binding_power(&TokenKind::Star).unwrap();
        assert!(mul_bp.0 > add_bp.0);

        let and_bp = infix_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        let or_bp = infix_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        assert!(and_bp.0 > or_bp.0);

        let eq_bp = infix_binding_power(&TokenKind::Eq).unwrap();
        assert!(eq_bp.0 > and_bp.0);
        assert!(NOT_BP > and_bp.1);
    }

    #[test]
    fn test_left_associativity() {
        let (left, right) = infix_binding_power(&TokenKind::Minus).unwrap();
        assert!(left < right);
    }

    #[test]
    fn test_casts_bind_tightest() {
        assert!(postfix_binding_power(&TokenKind::DoubleColon).unwrap() > UNARY_BP);
    }

    #[test]
    fn test_binary_operator_spelling() {
        assert_eq!(binary_operator(&TokenKind::Plus).as_deref(), Some("+"));
        assert_eq!(binary_operator(&TokenKind::NotEq).as_deref(), Some("<>"));
        assert_eq!(
            binary_operator(&TokenKind::Keyword(Keyword::ILike)).as_deref(),
            Some("ILIKE")
        );
        assert_eq!(
            binary_operator(&TokenKind::Operator("->>".into())).as_deref(),
            Some("->>")
        );
        assert_eq!(binary_operator(&TokenKind::LeftParen), None);
    }

    #[test]
    fn test_unary_operator() {
        assert_eq!(unary_operator(&TokenKind::Minus), Some("-"));
        assert_eq!(unary_operator(&TokenKind::Keyword(Keyword::Not)), Some("NOT"));
        assert_eq!(unary_operator(&TokenKind::Star), None);
    }
}
