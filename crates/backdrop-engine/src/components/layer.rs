/// Draw layer: controls paint order of exported primitives.
///
/// Layers are painted back-to-front: fog first, actors last.
/// Within `Actors`, primitives are ordered by depth (ascending y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DrawLayer {
    Fog = 0,
    /// Track marks and other decals on the ground line.
    Ground = 1,
    Particles = 2,
    Actors = 3,
}

impl DrawLayer {
    /// Total number of draw layers.
    pub const COUNT: usize = 4;

    /// Convert from a u8 value. Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Fog),
            1 => Some(Self::Ground),
            2 => Some(Self::Particles),
            3 => Some(Self::Actors),
            _ => None,
        }
    }

    /// Convert to u8 for the packed protocol.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
