//! Ready-made hierarchy for standard library types.
//!
//! ```text
//! Number
//! ├── Integer ── i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize
//! └── Float ──── f32 f64
//! CharSequence ── String
//! bool
//! char
//! ```
//!
//! The abstract nodes (`Number`, `Integer`, `Float`, `CharSequence`) are marker
//! types: they exist to be used as lookup keys and bounds.

use crate::impl_typed;

/// Any numeric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Number;

/// Any integral numeric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Integer;

/// Any floating point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float;

/// Any readable character sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharSequence;

impl_typed! {
    Number: "Number";
    Integer: "Integer" => [Number];
    Float: "Float" => [Number];
    CharSequence: "CharSequence";

    i8: "i8" => [Integer];
    i16: "i16" => [Integer];
    i32: "i32" => [Integer];
    i64: "i64" => [Integer];
    i128: "i128" => [Integer];
    isize: "isize" => [Integer];
    u8: "u8" => [Integer];
    u16: "u16" => [Integer];
    u32: "u32" => [Integer];
    u64: "u64" => [Integer];
    u128: "u128" => [Integer];
    usize: "usize" => [Integer];

    f32: "f32" => [Float];
    f64: "f64" => [Float];

    String: "String" => [CharSequence];
    bool: "bool";
    char: "char";
}
