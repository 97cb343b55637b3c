//! Classification of Ruby identifier names.
//!
//! Every routine walks the name by `char`, i.e. by Unicode code point, so
//! astral characters are inspected as one unit. No routine indexes bytes.

use strum::{Display, IntoStaticStr};
use unicode_general_category::{GeneralCategory, get_general_category};

/// The kind of variable or constant a name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierType {
    /// Not a valid identifier of any kind.
    Junk,
    /// `foo`
    Local,
    /// `$foo`
    Global,
    /// `@@foo`
    Class,
    /// `@foo`
    Instance,
    /// `Foo`
    Const,
}

/// Operator method names which `Symbol#inspect` prints without quotes.
const OPERATOR_NAMES: &[&str] = &[
    "+", "-", "*", "/", "%", "**", "==", "!=", "===", "=~", "!~", "<=>", "<", "<=", ">", ">=", "!", "[]", "[]=",
    "<<", ">>", "&", "|", "^", "~", "+@", "-@", "`",
];

/// Classifies `id` by its leading code point.
///
/// Only `Local` and `Global`/`Class` results validate the whole name; a
/// `Const` or `Instance` result only looks at the first code point(s).
#[must_use]
pub fn classify(id: &str) -> IdentifierType {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return IdentifierType::Junk;
    };
    let rest = chars.as_str();
    match first {
        '\0' => IdentifierType::Junk,
        '$' => {
            if is_valid_identifier(rest) {
                IdentifierType::Global
            } else {
                IdentifierType::Junk
            }
        }
        '@' => {
            if is_valid_class_variable_name(id) {
                IdentifierType::Class
            } else if rest.chars().next().is_some_and(is_initial_character) {
                IdentifierType::Instance
            } else {
                IdentifierType::Junk
            }
        }
        _ => {
            if first.is_uppercase() || (!first.is_lowercase() && is_titlecase(first)) {
                IdentifierType::Const
            } else if is_letter(first) && first.is_lowercase() && is_name_string(rest) {
                IdentifierType::Local
            } else {
                IdentifierType::Junk
            }
        }
    }
}

/// `Foo`, `FOO_BAR`: an ASCII capital followed by name characters.
#[must_use]
pub fn is_valid_constant_name(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some('A'..='Z')) && is_name_string(chars.as_str())
}

/// `foo`, `été`: a lowercase letter followed by name characters.
#[must_use]
pub fn is_valid_local_variable_name(id: &str) -> bool {
    let mut chars = id.chars();
    chars
        .next()
        .is_some_and(|first| is_letter(first) && first.is_lowercase() && is_name_string(chars.as_str()))
}

#[must_use]
pub fn is_valid_class_variable_name(id: &str) -> bool {
    id.strip_prefix("@@").is_some_and(is_valid_identifier)
}

#[must_use]
pub fn is_valid_global_variable_name(id: &str) -> bool {
    id.strip_prefix('$').is_some_and(is_valid_identifier)
}

/// `@foo`. `@@foo` is rejected because its second code point is not an initial character.
#[must_use]
pub fn is_valid_instance_variable_name(id: &str) -> bool {
    id.strip_prefix('@').is_some_and(is_valid_identifier)
}

/// Formats a symbol name the way `Symbol#inspect` does.
///
/// Identifiers (optionally ending in `?`, `!` or `=`), sigiled variable names,
/// special globals such as `$1` or `$~` and operator names print bare;
/// anything else is quoted.
#[must_use]
pub fn inspect_symbol(name: &str) -> String {
    if is_plain_symbol(name) {
        return format!(":{name}");
    }
    let mut out = String::with_capacity(name.len() + 3);
    out.push_str(":\"");
    for c in name.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_plain_symbol(name: &str) -> bool {
    if OPERATOR_NAMES.contains(&name) {
        return true;
    }
    if is_valid_global_variable_name(name)
        || is_special_global_name(name)
        || is_valid_class_variable_name(name)
        || is_valid_instance_variable_name(name)
    {
        return true;
    }
    let base = name
        .strip_suffix(['?', '!', '='])
        .filter(|base| !base.is_empty())
        .unwrap_or(name);
    is_valid_identifier(base)
}

/// An initial character followed by name characters.
fn is_valid_identifier(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next().is_some_and(is_initial_character) && is_name_string(chars.as_str())
}

/// Like MRI's `is_identchar` but without digits.
fn is_initial_character(c: char) -> bool {
    c.is_alphabetic() || c == '_' || u32::from(c) >= 128
}

/// Letters (any `L*` category), decimal digits (`Nd`) and `_`.
pub(crate) fn is_name_string(rest: &str) -> bool {
    rest.chars().all(|c| c == '_' || is_letter(c) || get_general_category(c) == GeneralCategory::DecimalNumber)
}

/// `$~`, `$!`, `$-w`, `$1`: globals the lexer reads outside the identifier rules.
fn is_special_global_name(name: &str) -> bool {
    const PUNCTUATION: &str = "~*$?!@/\\;,.=:<>\"&`'+0";
    let Some(rest) = name.strip_prefix('$') else {
        return false;
    };
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PUNCTUATION.contains(c) || c.is_ascii_digit(),
        (Some('-'), Some(c)) => chars.next().is_none() && (c == '_' || c.is_ascii_digit() || is_letter(c)),
        (Some(_), Some(_)) => rest.bytes().all(|b| b.is_ascii_digit()),
        (None, _) => false,
    }
}

/// Unicode general categories `Lu`, `Ll`, `Lt`, `Lm` and `Lo`.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

fn is_titlecase(c: char) -> bool {
    get_general_category(c) == GeneralCategory::TitlecaseLetter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_leading_code_point() {
        assert_eq!(classify("CONST_NAME"), IdentifierType::Const);
        assert_eq!(classify("local_name"), IdentifierType::Local);
        assert_eq!(classify("@ivar"), IdentifierType::Instance);
        assert_eq!(classify("@@cvar"), IdentifierType::Class);
        assert_eq!(classify("$global"), IdentifierType::Global);
        assert_eq!(classify(""), IdentifierType::Junk);
        assert_eq!(classify("1abc"), IdentifierType::Junk);
        assert_eq!(classify("\0abc"), IdentifierType::Junk);
    }

    #[test]
    fn classify_only_checks_prefix_for_const_and_instance() {
        assert_eq!(classify("Foo-bar"), IdentifierType::Const);
        assert_eq!(classify("@a-b"), IdentifierType::Instance);
        assert_eq!(classify("foo-bar"), IdentifierType::Junk);
        assert_eq!(classify("$a-b"), IdentifierType::Junk);
    }

    #[test]
    fn classify_sigil_edge_cases() {
        assert_eq!(classify("$"), IdentifierType::Junk);
        assert_eq!(classify("$1"), IdentifierType::Junk);
        assert_eq!(classify("$_"), IdentifierType::Global);
        assert_eq!(classify("@"), IdentifierType::Junk);
        assert_eq!(classify("@@"), IdentifierType::Junk);
        assert_eq!(classify("@1"), IdentifierType::Junk);
        assert_eq!(classify("@@1"), IdentifierType::Junk);
        assert_eq!(classify("_private"), IdentifierType::Junk);
    }

    #[test]
    fn classify_unicode() {
        assert_eq!(classify("été"), IdentifierType::Local);
        assert_eq!(classify("Été"), IdentifierType::Const);
        // LATIN CAPITAL LETTER D WITH SMALL LETTER Z WITH CARON, category Lt
        assert_eq!(classify("\u{01C5}x"), IdentifierType::Const);
        assert_eq!(classify("@\u{1F600}"), IdentifierType::Instance);
        assert_eq!(classify("$\u{1F600}"), IdentifierType::Global);
    }

    #[test]
    fn only_letters_and_decimal_digits_continue_a_name() {
        // SUPERSCRIPT TWO and VULGAR FRACTION ONE HALF, category No
        assert!(!is_valid_local_variable_name("a\u{00B2}"));
        assert!(!is_valid_local_variable_name("a\u{00BD}"));
        // ROMAN NUMERAL TWELVE, category Nl
        assert!(!is_valid_constant_name("FOO\u{216B}"));
        assert!(!is_valid_global_variable_name("$x\u{216B}"));
        // ARABIC-INDIC DIGIT ONE, category Nd
        assert!(is_valid_local_variable_name("a\u{0661}"));
        // MODIFIER LETTER SMALL H, category Lm
        assert!(is_valid_local_variable_name("a\u{02B0}"));
    }

    #[test]
    fn alphabetic_symbol_does_not_start_a_local() {
        // CIRCLED LATIN SMALL LETTER A is lowercase and alphabetic but category So.
        assert!(!is_valid_local_variable_name("\u{24D0}bc"));
        assert_eq!(classify("\u{24D0}bc"), IdentifierType::Junk);
        // It still counts as an initial character after a sigil.
        assert_eq!(classify("@\u{24D0}"), IdentifierType::Instance);
    }

    #[test]
    fn titlecase_table() {
        assert!(is_titlecase('\u{1FBC}'));
        assert!(is_titlecase('\u{1F8A}'));
        assert!(!is_titlecase('A'));
        assert!(!is_titlecase('a'));
    }

    #[test]
    fn constant_names() {
        assert!(is_valid_constant_name("Foo"));
        assert!(is_valid_constant_name("FOO_1"));
        assert!(!is_valid_constant_name("foo"));
        assert!(!is_valid_constant_name(""));
        assert!(!is_valid_constant_name("Été"));
        assert!(!is_valid_constant_name("Foo-bar"));
    }

    #[test]
    fn local_variable_names() {
        assert!(is_valid_local_variable_name("foo"));
        assert!(is_valid_local_variable_name("été_2"));
        assert!(!is_valid_local_variable_name("Foo"));
        assert!(!is_valid_local_variable_name("_foo"));
        assert!(!is_valid_local_variable_name("foo?"));
        assert!(!is_valid_local_variable_name(""));
    }

    #[test]
    fn sigiled_variable_names() {
        assert!(is_valid_class_variable_name("@@count"));
        assert!(!is_valid_class_variable_name("@count"));
        assert!(!is_valid_class_variable_name("@@"));
        assert!(is_valid_instance_variable_name("@name"));
        assert!(is_valid_instance_variable_name("@_name"));
        assert!(!is_valid_instance_variable_name("@@name"));
        assert!(!is_valid_instance_variable_name("@9"));
        assert!(is_valid_global_variable_name("$stdout"));
        assert!(!is_valid_global_variable_name("stdout"));
        assert!(!is_valid_global_variable_name("$"));
    }

    #[test]
    fn inspect_plain_and_quoted_symbols() {
        assert_eq!(inspect_symbol("b"), ":b");
        assert_eq!(inspect_symbol("empty?"), ":empty?");
        assert_eq!(inspect_symbol("name="), ":name=");
        assert_eq!(inspect_symbol("Foo"), ":Foo");
        assert_eq!(inspect_symbol("@ivar"), ":@ivar");
        assert_eq!(inspect_symbol("<=>"), ":<=>");
        assert_eq!(inspect_symbol("foo bar"), ":\"foo bar\"");
        assert_eq!(inspect_symbol("a-b"), ":\"a-b\"");
        assert_eq!(inspect_symbol("1st"), ":\"1st\"");
        assert_eq!(inspect_symbol(""), ":\"\"");
        assert_eq!(inspect_symbol("say \"hi\""), ":\"say \\\"hi\\\"\"");
    }

    #[test]
    fn inspect_special_globals() {
        assert_eq!(inspect_symbol("$1"), ":$1");
        assert_eq!(inspect_symbol("$12"), ":$12");
        assert_eq!(inspect_symbol("$~"), ":$~");
        assert_eq!(inspect_symbol("$!"), ":$!");
        assert_eq!(inspect_symbol("$0"), ":$0");
        assert_eq!(inspect_symbol("$-w"), ":$-w");
        assert_eq!(inspect_symbol("$"), ":\"$\"");
        assert_eq!(inspect_symbol("$-"), ":\"$-\"");
        assert_eq!(inspect_symbol("$-ww"), ":\"$-ww\"");
        assert_eq!(inspect_symbol("$1a"), ":\"$1a\"");
    }
}
