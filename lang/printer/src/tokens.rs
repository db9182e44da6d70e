//! Token strings shared by all printing implementations.

pub const ARROW: &str = "->";
pub const BACKSLASH: &str = "\\";
pub const COLON: &str = ":";
pub const COMMA: &str = ",";
pub const CONTRA: &str = "contra";
pub const DATA: &str = "data";
pub const DOT: &str = ".";
pub const EQUALS: &str = "=";
pub const FAT_ARROW: &str = "=>";
pub const IN: &str = "in";
pub const LET: &str = "let";
pub const MATCH: &str = "match";
pub const PRINTME: &str = "PRINTME";
pub const REFL: &str = "Refl";
pub const SUBST: &str = "subst";
pub const SUBST_BY: &str = "by";
pub const TRUSTME: &str = "TRUSTME";
pub const TYPE: &str = "Type";
pub const UNDERSCORE: &str = "_";
