pub mod test_compile;
pub mod test_flags;
pub mod test_lookaround;
pub mod test_program;
pub mod test_properties;
pub mod test_quantifiers;
pub mod test_region;
pub mod test_split;
