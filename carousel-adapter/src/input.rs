/// Keys the controller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(u32),
}

impl Key {
    pub const LEFT_ARROW_CODE: u32 = 37;
    pub const RIGHT_ARROW_CODE: u32 = 39;

    /// Maps a DOM-style key code.
    pub fn from_code(code: u32) -> Self {
        match code {
            Self::LEFT_ARROW_CODE => Self::ArrowLeft,
            Self::RIGHT_ARROW_CODE => Self::ArrowRight,
            other => Self::Other(other),
        }
    }
}
