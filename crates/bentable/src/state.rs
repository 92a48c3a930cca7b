//! Shared parse state machine pieces.

use crate::descriptor::DescriptorFlags;
use crate::error::BencodeType;

/// What the top open container expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameState {
    /// Inside a list: a value or the closing `e`.
    ListValue,
    /// Inside a dict: a key string or the closing `e`.
    DictKey,
    /// Inside a dict: the value for the pending key.
    DictValue,
}

impl FrameState {
    /// The role modifier a value parsed in this state receives.
    pub(crate) fn role_modifier(self) -> DescriptorFlags {
        match self {
            Self::ListValue => DescriptorFlags::LIST_VALUE,
            Self::DictKey => DescriptorFlags::DICT_KEY,
            Self::DictValue => DescriptorFlags::DICT_VALUE,
        }
    }

    /// The container kind this state belongs to, for error context.
    pub(crate) fn container(self) -> BencodeType {
        match self {
            Self::ListValue => BencodeType::List,
            Self::DictKey | Self::DictValue => BencodeType::Dict,
        }
    }
}

/// One open container on the parse stack.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StackFrame {
    pub state: FrameState,
    /// Index of the container's header descriptor, back-patched on close.
    /// The push parser carries no table and leaves this zero.
    pub header: u32,
    /// Number of elements (list) or key-value pairs (dict) seen so far.
    pub count: u32,
}
