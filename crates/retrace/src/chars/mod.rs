// Character classification tables and predicates
//
// Leaves of the engine: the compiler turns escapes, classes and property
// names into `CharPredicate` values built from these tables.

pub(crate) mod ascii;
pub(crate) mod blocks;
pub(crate) mod case;
pub(crate) mod predicate;
pub(crate) mod props;

pub(crate) use predicate::CharPredicate;
