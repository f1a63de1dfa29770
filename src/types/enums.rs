#![allow(missing_docs)]

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Scope kinds as encoded in FST hierarchy records.
///
/// Scope kinds are carried through the pipeline as opaque `u8` values; this
/// table exists for classification and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ScopeKind {
    Module = 0,
    Task = 1,
    Function = 2,
    Begin = 3,
    Fork = 4,
    Generate = 5,
    Struct = 6,
    Union = 7,
    Class = 8,
    Interface = 9,
    Package = 10,
    Program = 11,
    VhdlArchitecture = 12,
    VhdlProcedure = 13,
    VhdlFunction = 14,
    VhdlRecord = 15,
    VhdlProcess = 16,
    VhdlBlock = 17,
    VhdlForGenerate = 18,
    VhdlIfGenerate = 19,
    VhdlGenerate = 20,
    VhdlPackage = 21,
}

/// Variable kinds as encoded in FST hierarchy records.
///
/// Only [`VarKind::Wire`] and [`VarKind::Reg`] are nets that contribute
/// switching activity; every other kind is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum VarKind {
    Event = 0,
    Integer = 1,
    Parameter = 2,
    Real = 3,
    RealParameter = 4,
    Reg = 5,
    Supply0 = 6,
    Supply1 = 7,
    Time = 8,
    Tri = 9,
    TriAnd = 10,
    TriOr = 11,
    TriReg = 12,
    Tri0 = 13,
    Tri1 = 14,
    WAnd = 15,
    Wire = 16,
    WOr = 17,
    Port = 18,
    SparseArray = 19,
    RealTime = 20,
    GenString = 21,
    SvBit = 22,
    SvLogic = 23,
    SvInt = 24,
    SvShortInt = 25,
    SvLongInt = 26,
    SvByte = 27,
    SvEnum = 28,
    SvShortReal = 29,
}

impl VarKind {
    /// Returns `true` for the kinds whose value streams are reduced to
    /// activity annotations.
    pub fn is_net(kind: u8) -> bool {
        matches!(Self::try_from(kind), Ok(Self::Wire | Self::Reg))
    }
}
